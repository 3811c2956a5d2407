use crane_sim::control::Key;
use crane_sim::delivery::DeliveryStep;
use crane_sim::{CraneSite, SimulationConfig};

const DT: f64 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Optional scene file as the first argument, stock scene otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_toml_file(path)?,
        None => SimulationConfig::from_toml_str(
            r#"
            [[cargo]]
            position = [10.0, 1.0, 0.0]
            radius = 1.0

            [telemetry]
            record = true
            "#,
        )?,
    };
    let mut site = CraneSite::new(&config)?;

    println!("Lowering the hook onto the cargo...");
    site.on_key_down(Key::D);
    while site.step() == DeliveryStep::Idle && site.frame() < 3600 {
        site.update(DT);
    }
    println!("Picked up after {} frames", site.frame());

    let mut last = site.step();
    while site.step() != DeliveryStep::Idle && site.frame() < 36000 {
        site.update(DT);
        if site.step() != last {
            println!("frame {:>5}: {:?}", site.frame(), site.step());
            last = site.step();
        }
    }

    println!("{}", site.snapshot().to_json()?);

    if let Some(trace) = site.trace() {
        let path = std::env::temp_dir().join("crane_delivery.csv");
        trace.write_csv(&path)?;
        println!("Wrote {} frames to {}", trace.len(), path.display());
    }

    Ok(())
}
