use crate::config::CheckoutConfig;
use crate::models::flight::Flight;
use crate::models::search::{CabinClass, PassengerCounts};
use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Share of the total reported as carrier tariff; the rest is taxes and fees
const TARIFF_SHARE: Decimal = Decimal::from_parts(535, 0, 0, false, 3);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AddOns {
    #[serde(default)]
    pub fare_lock: bool,
    #[serde(default)]
    pub disruption_assistance: bool,
}

impl AddOns {
    pub fn total(&self, fees: &CheckoutConfig) -> Decimal {
        let mut total = Decimal::ZERO;
        if self.fare_lock {
            total += fees.fare_lock_fee;
        }
        if self.disruption_assistance {
            total += fees.disruption_assistance_fee;
        }
        total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PriceQuote {
    pub cabin_class: CabinClass,
    pub passengers: u16,
    pub outbound_fare: Decimal,
    pub inbound_fare: Option<Decimal>,
    pub fare_total: Decimal,
    pub add_ons: AddOns,
    pub add_ons_total: Decimal,
    pub total: Decimal,
    pub tariff: Decimal,
    pub taxes: Decimal,
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fare of one leg for every counted traveller.
pub fn leg_total(flight: &Flight, class: CabinClass, counts: &PassengerCounts) -> Decimal {
    flight.fare(class) * Decimal::from(counts.total())
}

/// `(fare(outbound) + fare(inbound)) * passengers + add-ons`, rounded to cents.
pub fn quote(
    outbound: &Flight,
    inbound: Option<&Flight>,
    class: CabinClass,
    counts: &PassengerCounts,
    add_ons: AddOns,
    fees: &CheckoutConfig,
) -> PriceQuote {
    let outbound_fare = outbound.fare(class);
    let inbound_fare = inbound.map(|f| f.fare(class));

    let per_passenger = outbound_fare + inbound_fare.unwrap_or(Decimal::ZERO);
    let fare_total = per_passenger * Decimal::from(counts.total());
    let add_ons_total = add_ons.total(fees);
    let total = round_money(fare_total + add_ons_total);
    let tariff = round_money(total * TARIFF_SHARE);

    PriceQuote {
        cabin_class: class,
        passengers: counts.total(),
        outbound_fare: round_money(outbound_fare),
        inbound_fare: inbound_fare.map(round_money),
        fare_total: round_money(fare_total),
        add_ons,
        add_ons_total: round_money(add_ons_total),
        total,
        tariff,
        taxes: total - tariff,
    }
}
