use chrono::Utc;

use crate::card::Card;
use crate::events::{Event, EventStore};
use crate::services::TransitService;
use crate::types::{BenefitKind, BenefitReport, CardVariant};

/// catalog of registered cards and services, used for benefit reporting
///
/// Membership is ordered and duplicates are permitted; the registry is a
/// display-side catalog, not an index.
#[derive(Default)]
pub struct Registry {
    cards: Vec<Card>,
    services: Vec<Box<dyn TransitService>>,
    pub events: EventStore,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            services: Vec::new(),
            events: EventStore::new(),
        }
    }

    /// register a card
    pub fn register_card(&mut self, card: Card) {
        self.events.emit(Event::CardRegistered {
            card_number: card.card_number().to_string(),
            variant: card.variant(),
            timestamp: Utc::now(),
        });
        self.cards.push(card);
    }

    /// register a service
    pub fn register_service(&mut self, service: Box<dyn TransitService>) {
        self.events.emit(Event::ServiceRegistered {
            name: service.name().to_string(),
            timestamp: Utc::now(),
        });
        self.services.push(service);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    pub fn services(&self) -> &[Box<dyn TransitService>] {
        &self.services
    }

    /// first registered card with the given number
    pub fn find_card(&self, card_number: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.card_number() == card_number)
    }

    pub fn find_card_mut(&mut self, card_number: &str) -> Option<&mut Card> {
        self.cards
            .iter_mut()
            .find(|c| c.card_number() == card_number)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// registrants that currently offer an active benefit
    ///
    /// Display-only: cards whose benefit validates, and services whose rule
    /// reduces the price for at least one context.
    pub fn active_benefits(&self) -> Vec<BenefitReport> {
        let mut report = Vec::new();

        for card in &self.cards {
            if !card.validate_benefit() {
                continue;
            }
            let description = match card.variant() {
                CardVariant::Discounted => "fixed discount on every fare".to_string(),
                CardVariant::Subsidized => {
                    // validate_benefit() true implies the tracker exists and is eligible
                    match card.subsidy() {
                        Some(tracker) => format!(
                            "{} of {} subsidized trips remaining",
                            tracker.cap() - tracker.trips_used(),
                            tracker.cap()
                        ),
                        None => continue,
                    }
                }
                CardVariant::Basic => continue,
            };
            report.push(BenefitReport {
                kind: BenefitKind::Card,
                label: card.card_number().to_string(),
                description,
            });
        }

        for service in &self.services {
            if service.offers_any_discount() {
                report.push(BenefitReport {
                    kind: BenefitKind::Service,
                    label: service.name().to_string(),
                    description: "offers discounts".to_string(),
                });
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardConfig;
    use crate::decimal::{Money, Rate};
    use crate::services::{BikeShareBuilder, PublicParkingBuilder};

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_card(Card::new(CardConfig::basic("001", "Carlos")).unwrap());
        registry.register_card(
            Card::new(CardConfig::discounted("002", "Maria", Rate::from_percentage(20)))
                .unwrap(),
        );
        registry.register_card(
            Card::new(CardConfig::subsidized(
                "003",
                "Julian",
                5,
                Money::from_major(1_000),
            ))
            .unwrap(),
        );
        registry.register_service(Box::new(BikeShareBuilder::new().build().unwrap()));
        registry.register_service(Box::new(PublicParkingBuilder::new().build().unwrap()));
        registry
    }

    #[test]
    fn test_registration_emits_events() {
        let mut registry = sample_registry();
        let events = registry.events.take_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::CardRegistered { .. }))
                .count(),
            3
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::ServiceRegistered { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_basic_card_offers_no_benefit() {
        let registry = sample_registry();
        let report = registry.active_benefits();
        assert!(!report.iter().any(|r| r.label == "001"));
    }

    #[test]
    fn test_active_benefits_lists_cards_and_services() {
        let registry = sample_registry();
        let report = registry.active_benefits();

        assert!(report
            .iter()
            .any(|r| r.kind == BenefitKind::Card && r.label == "002"));
        assert!(report
            .iter()
            .any(|r| r.kind == BenefitKind::Card && r.label == "003"));
        assert!(report
            .iter()
            .any(|r| r.kind == BenefitKind::Service && r.label == "PublicBike"));
        assert!(report
            .iter()
            .any(|r| r.kind == BenefitKind::Service && r.label == "PublicParking"));
    }

    #[test]
    fn test_exhausted_subsidy_drops_out_of_report() {
        let mut registry = sample_registry();
        {
            let card = registry.find_card_mut("003").unwrap();
            card.recharge(Money::from_major(30_000)).unwrap();
            for _ in 0..5 {
                card.pay_travel(Money::from_major(2_950)).unwrap();
            }
        }

        let report = registry.active_benefits();
        assert!(!report.iter().any(|r| r.label == "003"));
    }

    #[test]
    fn test_duplicates_are_permitted() {
        let mut registry = Registry::new();
        registry.register_card(Card::new(CardConfig::basic("001", "Carlos")).unwrap());
        registry.register_card(Card::new(CardConfig::basic("001", "Carlos")).unwrap());
        assert_eq!(registry.card_count(), 2);
    }

    #[test]
    fn test_find_card() {
        let registry = sample_registry();
        assert!(registry.find_card("002").is_some());
        assert!(registry.find_card("999").is_none());
    }
}
