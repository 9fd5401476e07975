#[tokio::main]
async fn main() {
    booking_engine::run().await;
}
