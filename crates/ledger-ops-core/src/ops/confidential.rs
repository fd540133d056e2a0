//! Blinded (confidential) balances.
//!
//! Blinded balances are not owned by accounts but by embedded authorities,
//! so spending one demands that authority directly. Fees for operations that
//! spend only blinded inputs are charged to [`AccountId::TEMP`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::authority::{Authority, RequiredAuthorities};
use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount};
use crate::validation::{check_positive, ensure, ValidationContext};

/// Size of a compressed Pedersen commitment.
pub const COMMITMENT_SIZE: usize = 33;

/// Maximum number of inputs or outputs of one blinded transfer.
pub const MAX_BLIND_PARTS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindInput {
    pub commitment: Bytes,
    pub owner: Authority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindOutput {
    pub commitment: Bytes,
    pub owner: Authority,
}

fn check_commitments<'a>(
    field: &'static str,
    commitments: impl Iterator<Item = &'a Bytes>,
) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for commitment in commitments {
        ensure(
            commitment.len() == COMMITMENT_SIZE,
            field,
            "commitment has the wrong size",
        )?;
        ensure(seen.insert(commitment), field, "duplicate commitment")?;
    }
    Ok(())
}

fn check_inputs(inputs: &[BlindInput]) -> Result<(), ValidationError> {
    ensure(!inputs.is_empty(), "inputs", "must not be empty")?;
    ensure(inputs.len() <= MAX_BLIND_PARTS, "inputs", "too many inputs")?;
    check_commitments("inputs", inputs.iter().map(|i| &i.commitment))?;
    inputs.iter().try_for_each(|i| i.owner.validate())
}

fn check_outputs(outputs: &[BlindOutput]) -> Result<(), ValidationError> {
    ensure(!outputs.is_empty(), "outputs", "must not be empty")?;
    ensure(outputs.len() <= MAX_BLIND_PARTS, "outputs", "too many outputs")?;
    check_commitments("outputs", outputs.iter().map(|o| &o.commitment))?;
    outputs.iter().try_for_each(|o| o.owner.validate())
}

fn require_input_owners(inputs: &[BlindInput], required: &mut RequiredAuthorities) {
    for input in inputs {
        required.require_other(input.owner.clone());
    }
}

/// Move a public balance into blinded outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferToBlindOperation {
    pub fee: AssetAmount,
    pub amount: AssetAmount,
    pub from: AccountId,
    pub blinding_factor: [u8; 32],
    pub outputs: Vec<BlindOutput>,
}

impl OperationBody for TransferToBlindOperation {
    fee_paid_by!(from);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &self.amount)?;
        check_outputs(&self.outputs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindTransferOperation {
    pub fee: AssetAmount,
    pub inputs: Vec<BlindInput>,
    pub outputs: Vec<BlindOutput>,
}

impl OperationBody for BlindTransferOperation {
    fn fee(&self) -> &AssetAmount {
        &self.fee
    }

    fn fee_payer(&self) -> AccountId {
        AccountId::TEMP
    }

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_inputs(&self.inputs)?;
        check_outputs(&self.outputs)?;
        check_commitments(
            "outputs",
            self.inputs
                .iter()
                .map(|i| &i.commitment)
                .chain(self.outputs.iter().map(|o| &o.commitment)),
        )
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        require_input_owners(&self.inputs, required);
    }
}

/// Reveal blinded inputs back into a public balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFromBlindOperation {
    pub fee: AssetAmount,
    pub amount: AssetAmount,
    pub to: AccountId,
    pub blinding_factor: [u8; 32],
    pub inputs: Vec<BlindInput>,
}

impl OperationBody for TransferFromBlindOperation {
    fn fee(&self) -> &AssetAmount {
        &self.fee
    }

    fn fee_payer(&self) -> AccountId {
        AccountId::TEMP
    }

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &self.amount)?;
        check_inputs(&self.inputs)
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        require_input_owners(&self.inputs, required);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::ops::Operation;

    fn owner(seed: u8) -> Authority {
        Authority::single_key(Keypair::from_seed(&[seed; 32]).public_key())
    }

    fn input(tag: u8, seed: u8) -> BlindInput {
        BlindInput {
            commitment: Bytes::from(vec![tag; COMMITMENT_SIZE]),
            owner: owner(seed),
        }
    }

    fn output(tag: u8, seed: u8) -> BlindOutput {
        BlindOutput {
            commitment: Bytes::from(vec![tag; COMMITMENT_SIZE]),
            owner: owner(seed),
        }
    }

    #[test]
    fn test_blind_transfer_requires_input_owners() {
        let op: Operation = BlindTransferOperation {
            fee: AssetAmount::core(5),
            inputs: vec![input(1, 1), input(2, 2)],
            outputs: vec![output(3, 3)],
        }
        .into();
        assert!(op.validate().is_ok());
        let required = op.required_authorities();
        assert_eq!(required.active, BTreeSet::from([AccountId::TEMP]));
        assert_eq!(required.other, vec![owner(1), owner(2)]);
    }

    #[test]
    fn test_duplicate_commitment_rejected() {
        let op = BlindTransferOperation {
            fee: AssetAmount::core(5),
            inputs: vec![input(1, 1)],
            outputs: vec![output(1, 3)],
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_to_blind_outputs_not_required() {
        let op: Operation = TransferToBlindOperation {
            fee: AssetAmount::core(5),
            amount: AssetAmount::core(100),
            from: AccountId(30),
            blinding_factor: [7; 32],
            outputs: vec![output(1, 1)],
        }
        .into();
        let required = op.required_authorities();
        assert_eq!(required.active, BTreeSet::from([AccountId(30)]));
        assert!(required.other.is_empty());
    }

    #[test]
    fn test_short_commitment_rejected() {
        let mut bad = input(1, 1);
        bad.commitment = Bytes::from_static(&[1, 2, 3]);
        let op = TransferFromBlindOperation {
            fee: AssetAmount::core(5),
            amount: AssetAmount::core(100),
            to: AccountId(30),
            blinding_factor: [7; 32],
            inputs: vec![bad],
        };
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::MalformedField { field: "inputs", .. })
        ));
    }
}
