use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Seed the local document store with a dashboard payload",
        long_about = "Read a dashboard payload (snapshot, stories, policies, discussions, events, elections) from a JSON file, validate it, and store it as the newest dashboard document in the SQLite store given by --store-path."
    )]
    ImportDashboard {
        #[arg(long, value_name = "PATH", help = "JSON file holding the dashboard payload")]
        file: PathBuf,
    },
}
