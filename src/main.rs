#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    isis_report_server::run().await
}
