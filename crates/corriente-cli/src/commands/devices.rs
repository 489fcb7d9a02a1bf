//! Audio device listing command.

use corriente_io::{AudioBackend, CpalBackend};

pub fn run() -> anyhow::Result<()> {
    let backend = CpalBackend::new();
    let devices = backend.list_devices()?;

    if devices.is_empty() {
        println!("No audio devices found.");
        return Ok(());
    }

    let inputs: Vec<_> = devices.iter().filter(|d| d.is_input).collect();
    if !inputs.is_empty() {
        println!("Input devices:");
        for (idx, device) in inputs.iter().enumerate() {
            println!(
                "  [{idx}] {} ({} Hz)",
                device.name, device.default_sample_rate
            );
        }
        println!();
    }

    let outputs: Vec<_> = devices.iter().filter(|d| d.is_output).collect();
    if !outputs.is_empty() {
        println!("Output devices:");
        for (idx, device) in outputs.iter().enumerate() {
            println!(
                "  [{idx}] {} ({} Hz)",
                device.name, device.default_sample_rate
            );
        }
        println!();
    }

    println!("Total: {} input(s), {} output(s)", inputs.len(), outputs.len());
    println!();
    println!("Select devices by index or (partial) name:");
    println!("  corriente passthrough --input 0 --output \"USB\"");

    Ok(())
}
