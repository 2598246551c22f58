//! Coin selection and merge/split command emission.
//!
//! Deposits must pass a coin object holding exactly the requested amount.
//! Wallets hold balances scattered over many coin objects, so the assembler
//! selects coins in listing order until they cover the target, folds the
//! extras into the first selected coin with a single `MergeCoins`, and carves
//! the exact amount out of it with a single `SplitCoins`.

use crate::chain::rpc::CoinRecord;
use crate::chain::types::{Argument, CallArg, Command, ObjectArg, ProgrammableTransaction};
use crate::error::ChainError;

/// Pick coins in order until their balances cover `target`.
///
/// Returns the selected slice. Selection is pure; nothing is emitted.
pub fn select_coins<'a>(
    coins: &'a [CoinRecord],
    coin_type: &str,
    target: u128,
) -> Result<&'a [CoinRecord], ChainError> {
    if coins.is_empty() {
        return Err(ChainError::NoCoinsAvailable {
            coin_type: coin_type.to_string(),
        });
    }

    let mut sum: u128 = 0;
    for (i, coin) in coins.iter().enumerate() {
        sum = sum.saturating_add(coin.balance);
        if sum >= target {
            return Ok(&coins[..=i]);
        }
    }

    Err(ChainError::InsufficientBalance {
        coin_type: coin_type.to_string(),
        available: sum,
        required: target,
    })
}

/// Emit the merge/split commands that produce a coin of exactly `target`.
///
/// Returns the index of the split command; its first result
/// (`Argument::NestedResult(index, 0)`) is the exact-amount coin.
pub fn split_exact(
    tx: &mut ProgrammableTransaction,
    selected: &[CoinRecord],
    target: u64,
) -> Result<u16, ChainError> {
    let first = selected
        .first()
        .ok_or_else(|| ChainError::Encode("no coins selected".to_string()))?;
    let primary = tx.input(CallArg::Object(ObjectArg::ImmOrOwned(first.object_ref())));

    if selected.len() > 1 {
        let sources: Vec<Argument> = selected[1..]
            .iter()
            .map(|coin| tx.input(CallArg::Object(ObjectArg::ImmOrOwned(coin.object_ref()))))
            .collect();
        tx.add_command(Command::MergeCoins(primary, sources));
    }

    let amount = tx.input(CallArg::pure_u64(target)?);
    Ok(tx.add_command(Command::SplitCoins(primary, vec![amount])))
}

/// Select + merge + split in one step. Returns the split command index.
pub fn prepare_exact_amount(
    tx: &mut ProgrammableTransaction,
    coins: &[CoinRecord],
    coin_type: &str,
    target: u64,
) -> Result<u16, ChainError> {
    let selected = select_coins(coins, coin_type, target as u128)?;
    split_exact(tx, selected, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::types::{ObjectDigest, ObjectId};

    fn coin(n: u8, balance: u128) -> CoinRecord {
        CoinRecord {
            object_id: ObjectId([n; 32]),
            version: n as u64,
            digest: ObjectDigest(vec![n; 32]),
            balance,
        }
    }

    #[test]
    fn test_three_fives_cover_twelve() {
        let coins = vec![coin(1, 5), coin(2, 5), coin(3, 5)];
        let selected = select_coins(&coins, "0x2::usdc::USDC", 12).unwrap();
        assert_eq!(selected.len(), 3);

        let mut tx = ProgrammableTransaction::new();
        let split = split_exact(&mut tx, selected, 12).unwrap();

        // One merge folding coins 2 and 3 into coin 1, then the split.
        assert_eq!(tx.commands.len(), 2);
        assert_eq!(split, 1);
        match &tx.commands[0] {
            Command::MergeCoins(Argument::Input(0), sources) => assert_eq!(sources.len(), 2),
            other => panic!("expected merge, got {other:?}"),
        }
        match &tx.commands[1] {
            Command::SplitCoins(Argument::Input(0), amounts) => {
                assert_eq!(amounts.len(), 1);
                let Argument::Input(idx) = amounts[0] else {
                    panic!("expected input amount");
                };
                assert_eq!(
                    tx.inputs[idx as usize],
                    CallArg::pure_u64(12).unwrap()
                );
            }
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn test_selection_stops_at_coverage() {
        let coins = vec![coin(1, 10), coin(2, 10), coin(3, 10)];
        let selected = select_coins(&coins, "t", 10).unwrap();
        assert_eq!(selected.len(), 1);
        let selected = select_coins(&coins, "t", 11).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_single_coin_skips_merge() {
        let coins = vec![coin(1, 100)];
        let mut tx = ProgrammableTransaction::new();
        let split = prepare_exact_amount(&mut tx, &coins, "t", 40).unwrap();
        assert_eq!(split, 0);
        assert_eq!(tx.commands.len(), 1);
        assert!(matches!(tx.commands[0], Command::SplitCoins(_, _)));
    }

    #[test]
    fn test_exact_balance_still_splits() {
        let coins = vec![coin(1, 12)];
        let mut tx = ProgrammableTransaction::new();
        prepare_exact_amount(&mut tx, &coins, "t", 12).unwrap();
        assert_eq!(tx.commands.len(), 1);
        assert!(matches!(tx.commands[0], Command::SplitCoins(_, _)));
    }

    #[test]
    fn test_no_coins_available() {
        let err = select_coins(&[], "0x2::usdc::USDC", 1).unwrap_err();
        match err {
            ChainError::NoCoinsAvailable { coin_type } => {
                assert_eq!(coin_type, "0x2::usdc::USDC")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_insufficient_balance_reports_total_and_emits_nothing() {
        let coins = vec![coin(1, 5), coin(2, 5)];
        let mut tx = ProgrammableTransaction::new();
        let err = prepare_exact_amount(&mut tx, &coins, "t", 12).unwrap_err();
        match err {
            ChainError::InsufficientBalance {
                available,
                required,
                ..
            } => {
                assert_eq!(available, 10);
                assert_eq!(required, 12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(tx.commands.is_empty());
        assert!(tx.inputs.is_empty());
    }
}
