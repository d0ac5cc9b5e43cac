//! Attester set administration
//!
//! All operations here require the attester-manager role. Disabling is
//! constrained so the set can never drop below the signature threshold
//! or become empty.

use alloy_primitives::Address;
use tracing::info;

use crate::error::{CctpError, Result};
use crate::events::Event;
use crate::protocol::Attester;
use crate::state::StateStore;

use super::{CctpModule, Context};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    /// Adds a public key to the attester set.
    pub fn enable_attester(&mut self, from: Address, attester: &str) -> Result<()> {
        let mut ctx = Context::default();
        self.require_attester_manager(&ctx, from)?;

        if self.get_attester(&ctx, attester).is_some() {
            return Err(CctpError::AttesterAlreadyExists(attester.to_string()));
        }
        self.set_attester(&mut ctx, &Attester::new(attester));

        info!(attester, event = "attester_enabled");
        ctx.emit(Event::AttesterEnabled {
            attester: attester.to_string(),
        });
        self.commit(ctx);
        Ok(())
    }

    /// Removes a public key from the attester set.
    pub fn disable_attester(&mut self, from: Address, attester: &str) -> Result<()> {
        let mut ctx = Context::default();
        self.require_attester_manager(&ctx, from)?;

        if self.get_attester(&ctx, attester).is_none() {
            return Err(CctpError::AttesterNotFound(attester.to_string()));
        }

        let count = self.get_all_attesters(&ctx).len() as u32;
        if count == 1 {
            return Err(CctpError::InvalidSignatureThreshold {
                reason: "cannot disable the last attester".to_string(),
            });
        }
        let signature_threshold = self
            .signature_threshold(&ctx)
            .ok_or(CctpError::NotConfigured {
                role: "signature threshold",
            })?;
        // Removal must leave at least `signature_threshold` attesters.
        if count <= signature_threshold {
            return Err(CctpError::InvalidSignatureThreshold {
                reason: "signature threshold is too low".to_string(),
            });
        }

        self.delete_attester(&mut ctx, attester);

        info!(attester, event = "attester_disabled");
        ctx.emit(Event::AttesterDisabled {
            attester: attester.to_string(),
        });
        self.commit(ctx);
        Ok(())
    }

    /// Sets how many valid signatures an attestation must carry.
    pub fn update_signature_threshold(&mut self, from: Address, amount: u32) -> Result<()> {
        let mut ctx = Context::default();
        self.require_attester_manager(&ctx, from)?;

        if amount == 0 {
            return Err(CctpError::InvalidSignatureThreshold {
                reason: "signature threshold must be positive".to_string(),
            });
        }
        let old = self.signature_threshold(&ctx);
        if old == Some(amount) {
            return Err(CctpError::InvalidSignatureThreshold {
                reason: "signature threshold already set to this value".to_string(),
            });
        }
        let count = self.get_all_attesters(&ctx).len() as u32;
        if amount > count {
            return Err(CctpError::InvalidSignatureThreshold {
                reason: "new signature threshold is too high".to_string(),
            });
        }

        self.set_signature_threshold(&mut ctx, amount);

        info!(old = old.unwrap_or(0), new = amount, event = "signature_threshold_updated");
        ctx.emit(Event::SignatureThresholdUpdated {
            old_signature_threshold: old.unwrap_or(0),
            new_signature_threshold: amount,
        });
        self.commit(ctx);
        Ok(())
    }
}
