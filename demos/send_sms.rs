use std::io;

use turbosms::{SendSms, SmsSender};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let login = required_env("TURBOSMS_LOGIN")?;
    let password = required_env("TURBOSMS_PASSWORD")?;
    let sender_name = required_env("TURBOSMS_SENDER")?;
    let phone = required_env("TURBOSMS_PHONE")?;
    let message = std::env::var("TURBOSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the turbosms demo.".to_owned());
    let debug = std::env::var("TURBOSMS_DEBUG").is_ok_and(|value| value == "1");

    let mut sender = SmsSender::builder(login, password, sender_name)
        .debug(debug)
        .build()?;
    sender.send(SendSms::new([phone], message)).await?;

    for line in sender.last_results() {
        println!("{line}");
    }

    Ok(())
}
