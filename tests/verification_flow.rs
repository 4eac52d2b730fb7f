//! End-to-end verification workflow tests against programmable doubles.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, TxHash};
use std::sync::Arc;

use tokengate::chain::TransferDetails;
use tokengate::identity::BindingStore;
use tokengate::platform::{GuildId, RoleId, UserId};
use tokengate::verify::{ProofPolicy, Verdict, VerificationWorkflow, VerifyError};

mod common;
use common::{MemoryPlatform, MockChain};

const WALLET: &str = "0x1ea72dcf86c95597360879ed589c175f9a655a30";
const OTHER: &str = "0x00000000219ab540356cbb839cbe05303d7705fa";
const HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

const GUILD: GuildId = GuildId(1);
const ROLE: RoleId = RoleId(77);
const USER: UserId = UserId(42);

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn hash(s: &str) -> TxHash {
    s.parse().unwrap()
}

fn self_transfer(wallet: &str, amount: &str) -> TransferDetails {
    TransferDetails {
        from: addr(wallet),
        to: Some(addr(wallet)),
        value: parse_ether(amount).unwrap(),
    }
}

struct Harness {
    chain: MockChain,
    platform: Arc<MemoryPlatform>,
    workflow: VerificationWorkflow,
}

fn harness() -> Harness {
    let chain = MockChain::new();
    let platform = Arc::new(MemoryPlatform::new(vec![GUILD]));
    let workflow = VerificationWorkflow::new(
        Arc::new(chain.clone()),
        BindingStore::new(),
        platform.clone(),
        ProofPolicy {
            min_transfer_amount: 0.01,
            role_id: ROLE,
        },
    );
    Harness {
        chain,
        platform,
        workflow,
    }
}

#[tokio::test]
async fn grants_role_for_valid_proof_and_held_token() {
    let h = harness();
    h.chain.insert_transfer(hash(HASH), self_transfer(WALLET, "0.01"));
    h.chain.set_balance(addr(WALLET), 2);

    // Mixed-case input normalizes to the same binding.
    let bound = h
        .workflow
        .submit_wallet(USER, &WALLET.to_uppercase().replace("0X", "0x"))
        .await
        .unwrap();
    assert_eq!(bound, addr(WALLET));

    let verdict = h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap();
    assert_eq!(verdict, Verdict::Granted);
    assert!(h.platform.holds(GUILD, USER, ROLE));

    let messages = h.platform.notifications_for(USER);
    assert!(messages.iter().any(|m| m.contains("Wallet received")));
    assert!(messages.iter().any(|m| m.contains("NFT verified")));
}

#[tokio::test]
async fn invalid_address_leaves_prior_binding_unchanged() {
    let h = harness();

    h.workflow.submit_wallet(USER, WALLET).await.unwrap();
    let err = h.workflow.submit_wallet(USER, "not-a-wallet").await.unwrap_err();
    assert!(matches!(err, VerifyError::InvalidAddress));

    assert_eq!(h.workflow.store().wallet(&USER), Some(addr(WALLET)));
    assert!(h
        .platform
        .notifications_for(USER)
        .iter()
        .any(|m| m.contains("Invalid wallet address")));
}

#[tokio::test]
async fn differently_cased_inputs_produce_identical_bindings() {
    let h = harness();

    h.workflow.submit_wallet(UserId(1), WALLET).await.unwrap();
    h.workflow
        .submit_wallet(UserId(2), &WALLET.to_uppercase().replace("0X", "0x"))
        .await
        .unwrap();

    assert_eq!(
        h.workflow.store().wallet(&UserId(1)),
        h.workflow.store().wallet(&UserId(2))
    );
}

#[tokio::test]
async fn proof_without_claim_is_rejected() {
    let h = harness();
    let err = h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap_err();
    assert!(matches!(err, VerifyError::NoBindingOnFile));
}

#[tokio::test]
async fn unknown_and_malformed_hashes_are_not_found() {
    let h = harness();
    h.workflow.submit_wallet(USER, WALLET).await.unwrap();

    let err = h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap_err();
    assert!(matches!(err, VerifyError::TransactionNotFound));

    let err = h
        .workflow
        .submit_proof(GUILD, USER, "0xnot-a-hash")
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::TransactionNotFound));
}

#[tokio::test]
async fn non_self_transfer_is_rejected_regardless_of_balance() {
    let h = harness();
    h.workflow.submit_wallet(USER, WALLET).await.unwrap();
    h.chain.set_balance(addr(WALLET), 5);
    h.chain.insert_transfer(
        hash(HASH),
        TransferDetails {
            from: addr(WALLET),
            to: Some(addr(OTHER)),
            value: parse_ether("0.01").unwrap(),
        },
    );

    let err = h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap_err();
    assert!(matches!(err, VerifyError::NotSelfTransfer));
    assert!(!h.platform.holds(GUILD, USER, ROLE));
}

#[tokio::test]
async fn wrong_amount_reports_observed_value() {
    let h = harness();
    h.workflow.submit_wallet(USER, WALLET).await.unwrap();
    h.chain.insert_transfer(hash(HASH), self_transfer(WALLET, "0.02"));

    let err = h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap_err();
    match err {
        VerifyError::AmountMismatch { observed, expected } => {
            assert!((observed - 0.02).abs() < 1e-9);
            assert!((expected - 0.01).abs() < f64::EPSILON);
        }
        other => panic!("unexpected error: {other}"),
    }

    // The user sees the specific amounts, not a generic failure.
    assert!(h
        .platform
        .notifications_for(USER)
        .iter()
        .any(|m| m.contains("0.020000")));
}

#[tokio::test]
async fn valid_proof_without_token_denies_and_removes_held_role() {
    let h = harness();
    h.platform.seed_holder(GUILD, USER, ROLE);
    h.workflow.submit_wallet(USER, WALLET).await.unwrap();
    h.chain.insert_transfer(hash(HASH), self_transfer(WALLET, "0.01"));
    h.chain.set_balance(addr(WALLET), 0);

    let verdict = h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap();
    assert_eq!(verdict, Verdict::Denied);
    assert!(!h.platform.holds(GUILD, USER, ROLE));
    assert!(h
        .platform
        .notifications_for(USER)
        .iter()
        .any(|m| m.contains("NFT not found")));
}

#[tokio::test]
async fn rpc_failure_is_retryable_and_leaves_binding_intact() {
    let h = harness();
    h.workflow.submit_wallet(USER, WALLET).await.unwrap();
    h.chain.insert_transfer(hash(HASH), self_transfer(WALLET, "0.01"));
    h.chain.fail_balance(addr(WALLET));

    let err = h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap_err();
    assert!(matches!(err, VerifyError::Rpc(_)));
    assert_eq!(h.workflow.store().wallet(&USER), Some(addr(WALLET)));

    // Chain recovers; the same hash now verifies without re-claiming.
    h.chain.set_balance(addr(WALLET), 1);
    let verdict = h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap();
    assert_eq!(verdict, Verdict::Granted);
}

#[tokio::test]
async fn repeated_grants_are_idempotent() {
    let h = harness();
    h.workflow.submit_wallet(USER, WALLET).await.unwrap();
    h.chain.insert_transfer(hash(HASH), self_transfer(WALLET, "0.01"));
    h.chain.set_balance(addr(WALLET), 1);

    assert_eq!(
        h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap(),
        Verdict::Granted
    );
    assert_eq!(
        h.workflow.submit_proof(GUILD, USER, HASH).await.unwrap(),
        Verdict::Granted
    );
    assert!(h.platform.holds(GUILD, USER, ROLE));
}

#[tokio::test]
async fn reclaiming_overwrites_the_binding() {
    let h = harness();
    h.workflow.submit_wallet(USER, WALLET).await.unwrap();
    h.workflow.submit_wallet(USER, OTHER).await.unwrap();
    assert_eq!(h.workflow.store().wallet(&USER), Some(addr(OTHER)));
}
