/// quick start - minimal example to get started
use fare_card_rs::{Card, CardConfig, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // create a basic fare card
    let mut card = Card::new(CardConfig::basic("001", "Carlos"))?;

    // add funds and ride
    card.recharge(Money::from_major(20_000))?;
    card.pay_travel(Money::from_major(2_950))?;

    // print current state
    println!("{}", card.json()?);

    Ok(())
}
