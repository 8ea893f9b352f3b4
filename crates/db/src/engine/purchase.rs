//! Buying a plan.

use studio_core::subscription::{draft_subscription, PurchasePlan};
use studio_core::types::DbId;

use crate::engine::{not_found, BookingEngine};
use crate::error::EngineResult;
use crate::models::subscription::ClientSubscription;
use crate::repositories::{ClientRepo, PlanRepo, SubscriptionRepo};

impl BookingEngine<'_> {
    /// Record a purchase of `input.plan_id` as a new active subscription.
    ///
    /// Card payments are recorded as pending; settling them is out of band.
    pub async fn purchase_plan(
        &self,
        client_id: DbId,
        input: &PurchasePlan,
    ) -> EngineResult<ClientSubscription> {
        let today = self.today(self.now());
        let mut tx = self.pool.begin().await?;

        let plan = PlanRepo::find_active(&mut *tx, input.plan_kind, input.plan_id)
            .await?
            .ok_or_else(|| not_found("plan", input.plan_id))?;
        let draft = draft_subscription(&plan.terms(input.plan_kind), input.payment_method, today)?;

        ClientRepo::ensure_exists(&mut *tx, client_id).await?;
        let subscription = SubscriptionRepo::create(&mut *tx, client_id, &draft).await?;

        tx.commit().await?;

        tracing::info!(
            subscription_id = subscription.id,
            client_id,
            plan_id = plan.id,
            payment_status_id = subscription.payment_status_id,
            "Plan purchased"
        );
        Ok(subscription)
    }
}
