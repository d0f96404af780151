/// card variants - basic, discounted, and subsidized fares side by side
use fare_card_rs::{Card, CardConfig, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut basic = Card::new(
        CardConfig::basic("001", "Carlos").with_initial_balance(Money::from_major(20_000)),
    )?;
    let mut discounted = Card::new(
        CardConfig::discounted("002", "Maria", Rate::from_percentage(20))
            .with_initial_balance(Money::from_major(50_000)),
    )?;
    let mut subsidized = Card::new(
        CardConfig::subsidized("003", "Julian", 5, Money::from_major(1_000))
            .with_initial_balance(Money::from_major(30_000)),
    )?;

    println!("initial balances:");
    println!("  {}: ${}", basic.holder(), basic.check_balance());
    println!("  {}: ${}", discounted.holder(), discounted.check_balance());
    println!("  {}: ${}", subsidized.holder(), subsidized.check_balance());

    // everyone rides once at the same base fare
    let base_fare = Money::from_major(2_950);
    basic.pay_travel(base_fare)?;
    discounted.pay_travel(base_fare)?;
    subsidized.pay_travel(base_fare)?;

    println!("\nbalances after one trip at ${base_fare}:");
    println!("  {}: ${}", basic.holder(), basic.check_balance());
    println!("  {}: ${}", discounted.holder(), discounted.check_balance());
    println!("  {}: ${}", subsidized.holder(), subsidized.check_balance());

    // a recharge over the basic ceiling is rejected, balance untouched
    match basic.recharge(Money::from_major(250_000)) {
        Err(e) => println!("\nrecharge rejected: {e}"),
        Ok(_) => unreachable!(),
    }
    println!("{} still has ${}", basic.holder(), basic.check_balance());

    Ok(())
}
