//! Headless walkthrough of the transition engine.
//!
//! Registers an element, fades it in, shows that re-issuing the identical
//! request mid-flight is a no-op, then retargets the transition and lets it
//! finish. Run with `cargo run -p demo-app`.

use anyhow::Result;

use swivel_config::SwivelConfig;
use swivel_core::{Animator, StyleMap, TimingOptions};
use swivel_headless::{ElementId, HeadlessHost};

fn main() -> Result<()> {
    let config = SwivelConfig::load();

    let mut host = HeadlessHost::new();
    let mut animator = Animator::new(config.timing_options());

    let toast = host.create_element("toast");
    animator.register("toast", toast.clone());

    println!("-- fade in: opacity 0 -> 1 over 150ms");
    let outcome = animator.from_to(
        &mut host,
        "toast",
        StyleMap::new().set("opacity", 0.0),
        StyleMap::new().set("opacity", 1.0),
        Some(TimingOptions::new().duration_ms(150.0)),
    );
    println!("   started {} animation(s)", outcome.started_count());

    host.advance(75.0);
    println!("-- re-issuing the identical request at t=75ms");
    let outcome = animator.from_to(
        &mut host,
        "toast",
        StyleMap::new().set("opacity", 0.0),
        StyleMap::new().set("opacity", 1.0),
        Some(TimingOptions::new().duration_ms(150.0)),
    );
    println!(
        "   started {} animation(s) (already in flight)",
        outcome.started_count()
    );

    host.advance(25.0);
    println!("-- retargeting to opacity 0.25 at t=100ms");
    let outcome = animator.to(
        &mut host,
        "toast",
        StyleMap::new().set("opacity", 0.25),
        Some(TimingOptions::new().duration_ms(150.0)),
    );
    println!("   started {} animation(s)", outcome.started_count());
    print_styles(&host, &toast, "   frozen mid-flight styles");

    host.advance(200.0);
    print_styles(&host, &toast, "-- settled styles");

    println!("-- host journal");
    for op in host.journal() {
        println!("   {:?}", op);
    }

    Ok(())
}

fn print_styles(host: &HeadlessHost, element: &ElementId, label: &str) {
    let styles: Vec<String> = host
        .styles_of(element)
        .iter()
        .map(|(property, value)| format!("{property}: {value:?}"))
        .collect();
    println!("{label} [{element}] {}", styles.join(", "));
}
