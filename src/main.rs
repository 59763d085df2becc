#[tokio::main]
async fn main() -> anyhow::Result<()> {
    civic_sphere::app::run().await
}
