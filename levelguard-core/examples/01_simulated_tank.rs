//! Simulated Tank - LevelGuard on the host
//!
//! A tank fills and then drains while the monitor classifies it. The
//! converter is simulated by a small `AnalogFrontEnd` implementation; the
//! delays are real but shortened.
//!
//! ```bash
//! cargo run --example 01_simulated_tank
//! ```

use std::convert::Infallible;

use levelguard_core::{
    channels::{Channel, PinId},
    time::{MicrosDurationU32, MillisDurationU32, StdDelay},
    AnalogFrontEnd, CycleReport, LevelMonitor, MonitorConfig, RawSample,
};

const LOW_PROBE_MM: i32 = 40;
const HIGH_PROBE_MM: i32 = 160;
const WET: u16 = 1850;
const DRY: u16 = 2400;

/// Tank whose level moves a few millimetres per read
struct SimulatedTank {
    level_mm: i32,
    step_mm: i32,
    selected: Channel,
    jitter: u16,
}

impl SimulatedTank {
    fn probe_reading(&mut self, probe_mm: i32) -> RawSample {
        self.jitter = (self.jitter + 37) % 61;
        let base = if self.level_mm > probe_mm { WET } else { DRY };
        base + self.jitter - 30
    }
}

impl AnalogFrontEnd for SimulatedTank {
    type Error = Infallible;

    fn init(&mut self) -> Result<(), Self::Error> {
        println!("converter up");
        Ok(())
    }

    fn configure_pin_for_analog(&mut self, pin: PinId) -> Result<(), Self::Error> {
        println!("GPIO {} in analog mode", pin);
        Ok(())
    }

    fn select_channel(&mut self, channel: Channel) -> Result<(), Self::Error> {
        self.selected = channel;
        Ok(())
    }

    fn read_raw(&mut self) -> nb::Result<RawSample, Self::Error> {
        self.level_mm = (self.level_mm + self.step_mm).clamp(0, 200);
        if self.level_mm == 200 {
            self.step_mm = -self.step_mm.abs();
        }

        let probe = if self.selected.index() == 0 { LOW_PROBE_MM } else { HIGH_PROBE_MM };
        Ok(self.probe_reading(probe))
    }
}

fn main() {
    let tank = SimulatedTank {
        level_mm: 0,
        step_mm: 1,
        selected: Channel::new(0),
        jitter: 0,
    };

    let config = MonitorConfig::default()
        .with_sample_delay(MicrosDurationU32::micros(100))
        .with_cycle_period(MillisDurationU32::millis(50));

    let reporter = |report: &CycleReport| println!("{}", report);

    let mut monitor = match LevelMonitor::new(tank, StdDelay, reporter, config) {
        Ok(monitor) => monitor,
        Err(err) => {
            eprintln!("bad configuration: {}", err);
            return;
        }
    };

    if let Err(err) = monitor.start() {
        eprintln!("start-up failed: {}", err);
        return;
    }

    for _ in 0..25 {
        monitor.cycle();
    }
}
