//! Set a light level through a vinsteon controller

use vinsteon::{Controller, Delivery, DeviceAddress, Level};

#[tokio::main]
async fn main() -> vinsteon::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Change to your controller and device
    let host =
        std::env::var("CONTROLLER_HOST").unwrap_or_else(|_| "controller.local".to_string());
    let device: DeviceAddress = std::env::var("DEVICE_ADDR")
        .unwrap_or_else(|_| "1A.D0.F4".to_string())
        .parse()?;

    let mut controller = Controller::new(host);
    controller.connect().await?;
    println!("✓ Connected to {}", controller.remote_addr());

    controller
        .set_level(device, Level::new(100), Delivery::Reliable)
        .await?;
    println!("✓ {} on", device);

    controller.disconnect().await?;
    println!("✓ Disconnected");

    Ok(())
}
