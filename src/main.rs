#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    api::launch().await?.launch().await?;
    Ok(())
}
