/// services - bike share and parking with both discount rule shapes
use fare_card_rs::{
    BikeShareBuilder, Card, CardConfig, Money, PublicParkingBuilder, Rate, RiderCategory,
    TransitService,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // rider-keyed rules: the card's rider category decides the price
    let bike = BikeShareBuilder::new().build()?;
    let parking = PublicParkingBuilder::new().build()?;

    let mut student = Card::new(
        CardConfig::basic("001", "Carlos")
            .with_initial_balance(Money::from_major(50_000))
            .with_rider_category(RiderCategory::Student),
    )?;
    let mut resident = Card::new(
        CardConfig::discounted("002", "Maria", Rate::from_percentage(20))
            .with_initial_balance(Money::from_major(50_000))
            .with_rider_category(RiderCategory::Resident),
    )?;

    bike.use_service(&mut student, dec!(2))?;
    println!(
        "student bike, 2h: balance ${}",
        student.check_balance()
    );

    parking.use_service(&mut resident, dec!(3))?;
    println!(
        "resident parking, 3h: balance ${}",
        resident.check_balance()
    );

    // variant-keyed rules: the paying card's variant decides the price
    let bike_by_variant = BikeShareBuilder::new().by_variant().build()?;
    let mut subsidized = Card::new(
        CardConfig::subsidized("003", "Julian", 5, Money::from_major(1_000))
            .with_initial_balance(Money::from_major(50_000)),
    )?;

    bike_by_variant.use_service(&mut subsidized, dec!(2))?;
    println!(
        "subsidized-variant bike, 2h: balance ${}",
        subsidized.check_balance()
    );

    Ok(())
}
