use crate::cli::Command;
use crate::context;

pub mod import;

pub trait CommandRunner {
    fn run(&self, ctx: &context::Context) -> anyhow::Result<()>;
}

impl Command {
    pub fn run(&self, ctx: &context::Context) -> anyhow::Result<()> {
        match self {
            Command::ImportDashboard { file } => import::ImportDashboard { file }.run(ctx),
        }
    }
}
