use crane_sim::control::Key;
use crane_sim::equipment::carousel::RingId;
use crane_sim::{CraneSite, SimulationConfig};

const DT: f64 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SimulationConfig::from_toml_str("[carousel]\nposition = [-30.0, 0.0]\nstep_rate = 6.0\n")?;
    let mut site = CraneSite::new(&config)?;

    for key in [Key::Digit1, Key::Digit2, Key::Digit3] {
        site.on_key_down(key);
    }

    for second in 0..10 {
        for _ in 0..60 {
            site.update(DT);
        }
        if let Some(carousel) = site.carousel() {
            let heights: Vec<String> = RingId::ALL
                .iter()
                .map(|id| format!("{:+.2}", site.graph().position(carousel.ring(*id).node).y))
                .collect();
            println!(
                "t = {:>2}s  spin {:.3} rad  rings [{}]",
                second + 1,
                carousel.rotation(),
                heights.join(", ")
            );
        }
    }

    Ok(())
}
