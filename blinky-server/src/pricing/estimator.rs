//! Price estimation for a cart delivered from a store site

use rust_decimal::Decimal;
use shared::models::{
    CartLine, Coordinate, ModifierOption, PriceEstimate, Product, StoreSite, TransportProfile,
};
use std::sync::Arc;
use uuid::Uuid;

use super::PricingError;
use super::calculator::{PricingRates, line_total};
use crate::db::{BoxError, Catalog, OrderTx};
use crate::routing::DistanceResolver;

/// Source of catalog rows for one estimate
enum Lookup<'a> {
    Catalog(&'a dyn Catalog),
    Tx(&'a mut dyn OrderTx),
}

impl Lookup<'_> {
    async fn store_site(&mut self, id: Uuid) -> Result<Option<StoreSite>, BoxError> {
        match self {
            Lookup::Catalog(catalog) => catalog.store_site(id).await,
            Lookup::Tx(tx) => tx.store_site(id).await,
        }
    }

    async fn product(&mut self, id: Uuid) -> Result<Option<Product>, BoxError> {
        match self {
            Lookup::Catalog(catalog) => catalog.product(id).await,
            Lookup::Tx(tx) => tx.product(id).await,
        }
    }

    async fn modifier_option(&mut self, id: Uuid) -> Result<Option<ModifierOption>, BoxError> {
        match self {
            Lookup::Catalog(catalog) => catalog.modifier_option(id).await,
            Lookup::Tx(tx) => tx.modifier_option(id).await,
        }
    }
}

pub struct PriceEstimator {
    catalog: Arc<dyn Catalog>,
    resolver: Arc<DistanceResolver>,
    rates: PricingRates,
}

impl PriceEstimator {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        resolver: Arc<DistanceResolver>,
        rates: PricingRates,
    ) -> Self {
        Self {
            catalog,
            resolver,
            rates,
        }
    }

    pub fn rates(&self) -> &PricingRates {
        &self.rates
    }

    /// Price `lines` delivered from `store_site_id` to `destination`
    ///
    /// A missing product aborts the estimate. A missing modifier option
    /// contributes nothing.
    pub async fn estimate(
        &self,
        store_site_id: Uuid,
        destination: Coordinate,
        lines: &[CartLine],
    ) -> Result<PriceEstimate, PricingError> {
        let lookup = Lookup::Catalog(self.catalog.as_ref());
        self.price(lookup, store_site_id, destination, lines).await
    }

    /// Same as [`estimate`](Self::estimate), reading catalog rows on `tx`
    ///
    /// Order creation prices this way so the whole order runs on the one
    /// connection its unit of work already holds.
    pub async fn estimate_in(
        &self,
        tx: &mut dyn OrderTx,
        store_site_id: Uuid,
        destination: Coordinate,
        lines: &[CartLine],
    ) -> Result<PriceEstimate, PricingError> {
        self.price(Lookup::Tx(tx), store_site_id, destination, lines).await
    }

    async fn price(
        &self,
        mut lookup: Lookup<'_>,
        store_site_id: Uuid,
        destination: Coordinate,
        lines: &[CartLine],
    ) -> Result<PriceEstimate, PricingError> {
        let site = lookup
            .store_site(store_site_id)
            .await?
            .ok_or(PricingError::StoreSiteNotFound(store_site_id))?;
        let origin = site
            .location()
            .ok_or(PricingError::LocationMissing(store_site_id))?;

        let distance = self
            .resolver
            .resolve(origin, destination, TransportProfile::default())
            .await?;

        let mut items_total = Decimal::ZERO;
        for line in lines {
            let product = lookup
                .product(line.product_id)
                .await?
                .ok_or(PricingError::ProductNotFound(line.product_id))?;

            let mut option_prices = Vec::with_capacity(line.selected_options.len());
            for selected in &line.selected_options {
                if let Some(option) = lookup.modifier_option(selected.modifier_option_id).await? {
                    option_prices.push(option.price);
                }
            }

            items_total = line_total(product.price, line.quantity, option_prices)
                .and_then(|amount| items_total.checked_add(amount))
                .ok_or(PricingError::InvalidPrice(product.id))?;
        }

        let breakdown = self
            .rates
            .breakdown(items_total, distance.distance_meters)
            .ok_or(PricingError::OutOfRange)?;

        tracing::debug!(
            store_site_id = %store_site_id,
            provider = %distance.provider_used,
            distance_m = distance.distance_meters,
            total = %breakdown.total,
            "Price estimated"
        );

        Ok(PriceEstimate {
            breakdown,
            approximated_distance: distance.distance_meters,
            currency: self.rates.currency.clone(),
        })
    }
}
