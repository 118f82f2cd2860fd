//! Example: interrupt-driven motor loaded from TOML.
//!
//! Simulates the firmware wiring on the host:
//! - The configuration is parsed from TOML
//! - The controller lives in a `static` [`SharedMotor`]
//! - A 1 kHz "timer interrupt" feeds a [`SoftwareTicker`]
//! - "Button interrupts" fire at fixed times
//! - The idle loop drains display notices
//!
//! Run with: `cargo run --example shared_motor`

use coil_stepper::{
    config::units::UnitExt, error::Result, parse_config, Button, CoilPins, MotorController,
    NoticeQueue, SharedMotor, SoftwareTicker,
};

/// Stand-in for a GPIO output driving one coil lead.
struct CoilLead {
    high: bool,
}

impl CoilLead {
    fn new() -> Self {
        Self { high: false }
    }
}

impl embedded_hal::digital::ErrorType for CoilLead {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for CoilLead {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

type Coils = CoilPins<CoilLead, CoilLead, CoilLead, CoilLead>;

static MOTOR: SharedMotor<Coils, SoftwareTicker, NoticeQueue<8>> = SharedMotor::new();

const CONFIG: &str = r#"
default_profile = "a"
speed_step_ms = 20
min_period_ms = 1
period_policy = "clamp"

[profiles.a]
name = "Profile A"
label = "36s per revolution"
full_step_period_ms = 750
half_step_period_ms = 375

[profiles.b]
name = "Profile B"
label = "43s per revolution"
full_step_period_ms = 896
half_step_period_ms = 448
"#;

/// Button presses as (millisecond, button).
const PRESSES: [(u32, Button); 5] = [
    (2_000, Button::StepMode),
    (3_000, Button::SpeedUp),
    (3_500, Button::SpeedUp),
    (5_000, Button::Direction),
    (6_000, Button::Profile),
];

fn main() -> Result<()> {
    println!("=== Shared Motor Example ===\n");

    let config = parse_config(CONFIG)?;
    println!("Loaded {} profiles", config.profile_count());

    let mut motor = MotorController::builder()
        .coils(CoilPins::new(
            CoilLead::new(),
            CoilLead::new(),
            CoilLead::new(),
            CoilLead::new(),
        ))
        .timer(SoftwareTicker::new())
        .display(NoticeQueue::new())
        .config(config)
        .build()?;
    motor.start();
    MOTOR.install(motor);

    let run_for = 8_000.ms();
    for now in 0..run_for.0 {
        // Timer interrupt
        let ticks = MOTOR.with(|m| m.elapse(1))??;
        if ticks > 0 {
            let (index, vector) = MOTOR.with(|m| (m.index(), m.current_vector()))?;
            println!("{:>5} ms  step -> index {} next {:?}", now, index, vector.to_array());
        }

        // Button interrupts
        for (at, button) in PRESSES {
            if at == now {
                println!("{:>5} ms  press {:?}", now, button);
                MOTOR.press(button)?;
            }
        }

        // Idle loop
        MOTOR.with(|m| {
            for notice in m.display_mut().drain() {
                println!("          display: {}", notice.text());
            }
        })?;
    }

    let motor = MOTOR.take();
    if let Some(mut motor) = motor {
        println!(
            "\nFinal: {:?}, {:?}, {} ms per step, {} ms per revolution",
            motor.step_mode(),
            motor.direction(),
            motor.period().0,
            motor.revolution_time().0
        );
        motor.release()?;
    }

    println!("\n=== Example Complete ===");

    Ok(())
}
