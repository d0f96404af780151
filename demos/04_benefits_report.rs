/// benefits report - registry listing of everything with an active benefit
use fare_card_rs::{
    BikeShareBuilder, Card, CardConfig, Money, PublicParkingBuilder, Rate, Registry,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = Registry::new();

    registry.register_card(Card::new(CardConfig::basic("001", "Carlos"))?);
    registry.register_card(Card::new(CardConfig::discounted(
        "002",
        "Maria",
        Rate::from_percentage(20),
    ))?);
    registry.register_card(Card::new(CardConfig::subsidized(
        "003",
        "Julian",
        5,
        Money::from_major(1_000),
    ))?);

    registry.register_service(Box::new(BikeShareBuilder::new().build()?));
    registry.register_service(Box::new(PublicParkingBuilder::new().build()?));

    println!(
        "registered {} cards and {} services",
        registry.card_count(),
        registry.service_count()
    );

    println!("\nactive benefits:");
    for line in registry.active_benefits() {
        println!("  {line}");
    }

    // exhaust the subsidy and report again
    {
        let card = registry.find_card_mut("003").expect("registered above");
        card.recharge(Money::from_major(10_000))?;
        for _ in 0..5 {
            card.pay_travel(Money::from_major(2_950))?;
        }
    }

    println!("\nactive benefits after exhausting the subsidy:");
    for line in registry.active_benefits() {
        println!("  {line}");
    }

    Ok(())
}
