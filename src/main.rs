#[actix_web::main]
async fn main() -> std::io::Result<()> {
    study_assistant_server::run().await
}
