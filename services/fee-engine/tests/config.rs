//! Fee policy config loading tests

use fee_engine::config::{FeeConfig, PayoutSpeed};
use types::prelude::*;

const CONFIG: &str = r#"{
    "withdraw": [
        {
            "name": "Imbalance",
            "strategy": "imbalance",
            "params": {
                "threshold": 1000000,
                "ratioAsBasisPoints": 50,
                "minFee": 2000,
                "daysLookback": 30
            }
        },
        { "name": "Future", "strategy": "loyaltyRebate", "params": { "level": 3 } },
        {
            "name": "Internal",
            "strategy": "internal",
            "params": { "roles": ["dealer", "bankowner"], "accountIds": [] }
        }
    ],
    "payoutQueues": [
        {
            "queueName": "dev-queue",
            "speed": "fast",
            "strategies": [
                {
                    "name": "Decay",
                    "strategy": "exponentialDecay",
                    "params": {
                        "minRate": 0.005,
                        "maxRate": 0.05,
                        "threshold": 4000000,
                        "minAmount": 10000,
                        "exponentialFactor": 18,
                        "divisor": 20000,
                        "targetRate": 0.007,
                        "minNetworkFee": 2,
                        "maxNetworkFee": 50,
                        "offset": 2.0,
                        "factor": 1.3
                    }
                }
            ]
        },
        {
            "queueName": "slow-queue",
            "speed": "slow",
            "strategies": [
                { "name": "Flat", "strategy": "flat", "params": { "amount": 500 } }
            ]
        }
    ]
}"#;

fn make_request(payment: i64, miner_fee: i64, fee_rate: f64) -> FeeRequest {
    FeeRequest::new(
        BtcPaymentAmount::new(payment),
        NetworkFee::new(BtcPaymentAmount::new(miner_fee), fee_rate),
        Account::new("accountId"),
        Wallet::new("walletId", WalletCurrency::Btc),
    )
}

#[test]
fn test_load_config() {
    let config = FeeConfig::from_json_str(CONFIG).unwrap();
    assert_eq!(config.withdraw.len(), 3);
    assert_eq!(config.payout_queues.len(), 2);
    assert_eq!(config.payout_queues[0].speed, PayoutSpeed::Fast);
}

#[test]
fn test_withdraw_calculator_skips_unknown_strategy() {
    let config = FeeConfig::from_json_str(CONFIG).unwrap();
    let calculator = config.withdraw_calculator().unwrap();
    assert_eq!(calculator.names(), vec!["Imbalance", "Internal"]);

    let request = make_request(500_000, 300, 5.0).with_imbalance(BtcPaymentAmount::new(0));
    // under threshold: min fee only
    assert_eq!(
        calculator.calculate(&request).unwrap(),
        BtcPaymentAmount::new(2_300)
    );

    let mut dealer = request.clone();
    dealer.account = Account::with_role("dealerId", "dealer");
    assert_eq!(
        calculator.calculate(&dealer).unwrap(),
        BtcPaymentAmount::new(300)
    );
}

#[test]
fn test_queue_calculator_accepts_queue_field_names() {
    let config = FeeConfig::from_json_str(CONFIG).unwrap();
    let calculator = config.queue_calculator("dev-queue").unwrap();

    let breakdown = calculator
        .calculate_breakdown(&make_request(1_000_000, 1_500, 25.0))
        .unwrap();
    assert_eq!(breakdown.miner_fee, BtcPaymentAmount::new(1_500));
    assert_eq!(breakdown.bank_fee, BtcPaymentAmount::new(9_306));
    assert_eq!(breakdown.total_fee, BtcPaymentAmount::new(10_806));
}

#[test]
fn test_queue_lookup() {
    let config = FeeConfig::from_json_str(CONFIG).unwrap();
    assert_eq!(config.queue("slow-queue").unwrap().speed, PayoutSpeed::Slow);
    assert_eq!(
        config.queue_for_speed(PayoutSpeed::Fast).unwrap().queue_name,
        "dev-queue"
    );
    assert_eq!(
        config.queue_for_speed(PayoutSpeed::Medium).unwrap_err(),
        ConfigError::NoQueueForSpeed {
            speed: "medium".to_string()
        }
    );
}

#[test]
fn test_unknown_queue() {
    let config = FeeConfig::from_json_str(CONFIG).unwrap();
    assert_eq!(
        config.queue_calculator("missing").unwrap_err(),
        ConfigError::UnknownQueue {
            queue_name: "missing".to_string()
        }
    );
}

#[test]
fn test_invalid_strategy_params_surface_as_validation_error() {
    let config = FeeConfig::from_json_str(
        r#"{ "withdraw": [
            { "name": "Flat", "strategy": "flat", "params": { "amount": 10.5 } }
        ] }"#,
    )
    .unwrap();
    assert!(matches!(
        config.withdraw_calculator(),
        Err(ConfigError::Validation(ValidationError::NonIntegerAmount { .. }))
    ));
}

#[test]
fn test_default_policy_charges_min_fee() {
    let calculator = FeeConfig::default().withdraw_calculator().unwrap();
    let request = make_request(10_000, 0, 0.0).with_imbalance(BtcPaymentAmount::new(0));
    assert_eq!(
        calculator.calculate(&request).unwrap(),
        BtcPaymentAmount::new(2_000)
    );
}
