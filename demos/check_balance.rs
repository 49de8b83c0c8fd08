use std::io;

use turbosms::SmsSender;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let login = std::env::var("TURBOSMS_LOGIN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TURBOSMS_LOGIN environment variable is required",
        )
    })?;
    let password = std::env::var("TURBOSMS_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TURBOSMS_PASSWORD environment variable is required",
        )
    })?;

    let mut sender = SmsSender::new(login, password, "")?;
    sender.authenticate().await?;
    let credits = sender.balance().await?;

    println!("credits: {}", credits.value());

    Ok(())
}
