/// subsidy trips - flat fare until the cap, full price afterwards
use fare_card_rs::{Card, CardConfig, Event, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut card = Card::new(
        CardConfig::subsidized("003", "Julian", 5, Money::from_major(1_000))
            .with_initial_balance(Money::from_major(30_000)),
    )?;

    let base_fare = Money::from_major(2_950);

    for _ in 0..6 {
        card.pay_travel(base_fare)?;
        let tracker = card.subsidy().expect("subsidized card");
        println!(
            "trip charged, balance ${}, trips used {}/{}",
            card.check_balance(),
            tracker.trips_used(),
            tracker.cap()
        );
    }

    // the event trail shows every payment and the exhaustion transition
    println!("\nevent trail:");
    for event in card.take_events() {
        match event {
            Event::PaymentReceived {
                amount,
                service,
                remaining_balance,
                ..
            } => println!("  paid ${amount} for {service}, balance ${remaining_balance}"),
            Event::SubsidyExhausted { cap, .. } => {
                println!("  subsidy exhausted after {cap} trips")
            }
            _ => {}
        }
    }

    Ok(())
}
