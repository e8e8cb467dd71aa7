#[tokio::main]
async fn main() -> anyhow::Result<()> {
  discoteca_lib::run().await
}
