use anyhow::Context;
use sheetkit_testing::FrameDriver;
use storefront_demo::{default_sessions, run_session, Storefront};

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== SheetKit Storefront ===");
    println!("Replaying scripted sessions against the storefront sheets.");
    println!("Set RUST_LOG=debug to see gesture decisions.");
    println!();

    let mut driver = FrameDriver::new();
    let storefront =
        Storefront::new(driver.runtime_handle()).context("storefront sheet presets are invalid")?;

    for session in default_sessions() {
        let report = run_session(&storefront, &mut driver, &session);
        println!("{} ({} frames)", report.name, report.frames);
        for line in &report.journal {
            println!("  {line}");
        }
        if report.passed_through > 0 {
            println!("  {} pointer events reached the screen", report.passed_through);
        }
        anyhow::ensure!(
            storefront.mounted().is_empty(),
            "session '{}' left sheets on screen: {:?}",
            report.name,
            storefront.mounted()
        );
        println!();
    }
    Ok(())
}
