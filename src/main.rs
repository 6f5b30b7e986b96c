use fever_baseline::error::ServiceError;

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    fever_baseline::app::run().await
}
