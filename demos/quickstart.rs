use chrono::NaiveDate;
use obsplan::normalize::unshift;
use obsplan::{
    BandingConfig, DateRange, FixedTarget, Location, ObservabilityPlot, Planet, Thresholds, Window,
};
use qtty::{Degrees, Hours};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let site = Location::new(32.9033, -106.9606, 2225.0, "US/Mountain")?;
    let begin = NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2021, 6, 30).ok_or("bad date")?;
    let targets = vec![
        FixedTarget::new("M42", Degrees::new(83.8221), Degrees::new(-5.3911)).into(),
        FixedTarget::new("M13", Degrees::new(250.4235), Degrees::new(36.4613)).into(),
        Planet::Saturn.into(),
    ];
    let banding = BandingConfig::default();
    let plot = ObservabilityPlot::new(
        site,
        targets,
        DateRange::new(begin, end)?,
        Thresholds::default(),
        banding,
    )?;
    let local = |h: Hours| unshift(h, banding.day_shift).value();

    println!("Astronomical night (local hours):");
    for (date, sun) in plot.dates().iter().zip(plot.sun_series()) {
        match sun.window {
            Window::Crossing { rise, set } => {
                println!("  {date}  dusk {:5.2}  dawn {:5.2}", local(set), local(rise))
            }
            Window::AlwaysUp => println!("  {date}  no night"),
            Window::AlwaysDown => println!("  {date}  dark all day"),
        }
    }

    println!("\nMoon bands:");
    for (i, band) in plot.moon_bands().iter().enumerate() {
        for ((date, rise, set), sample) in band.points().zip(&band.aux) {
            let lit = sample
                .illumination
                .map_or_else(|| "  ?".to_string(), |f| format!("{:3.0}%", f * 100.0));
            println!("  [{i}] {date}  {:5.2} .. {:5.2}  {lit}", rise.value(), set.value());
        }
    }

    for (index, target) in plot.calculator().targets().iter().enumerate() {
        println!("\n{}:", target.name());
        for (i, band) in plot.target_bands(index).unwrap_or_default().iter().enumerate() {
            for (date, rise, set) in band.points() {
                println!("  [{i}] {date}  {:5.2} .. {:5.2}", rise.value(), set.value());
            }
        }
        let observable = plot.observable_dates(index);
        println!("  observable on {} of {} sample dates", observable.len(), plot.dates().len());
    }

    Ok(())
}
