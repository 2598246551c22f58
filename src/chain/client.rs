//! Chain sub-client — assembles and submits the perp protocol's entry calls.
//!
//! Every operation exists in two flavors: keypair-signed (`deposit`, …) and
//! externally signed (`deposit_with_wallet`, …) where a [`WalletSigner`]
//! receives the encoded transaction bytes.

use crate::chain::coins;
use crate::chain::crypto::SuiKeyPair;
use crate::chain::rpc::TransactionResponse;
use crate::chain::types::{
    parse_struct_tag, Argument, CallArg, Command, GasBudget, GasData, ObjectId,
    ProgrammableMoveCall, ProgrammableTransaction, TransactionData,
};
use crate::chain::{PerpFunction, WalletSigner};
use crate::client::PerpClient;
use crate::error::{ChainError, SdkError};
use crate::network::{SUI_CLOCK_OBJECT_ID, SUI_COIN_TYPE};
use crate::shared;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Max gas payment objects attached to one transaction.
const MAX_GAS_COINS: usize = 16;

/// Sub-client for on-chain operations.
pub struct ChainOps<'a> {
    pub(crate) client: &'a PerpClient,
}

impl<'a> ChainOps<'a> {
    // ── Operations, keypair-signed ───────────────────────────────────────

    /// Move `amount` base units of the margin coin into the bank.
    pub async fn deposit(
        &self,
        key: &SuiKeyPair,
        amount: u64,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let tx = self.build_deposit(key.address(), amount).await?;
        self.sign_and_execute(key, tx, gas).await
    }

    /// Withdraw `amount` base units of margin from the bank.
    pub async fn withdraw(
        &self,
        key: &SuiKeyPair,
        amount: u128,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let tx = self.build_withdraw(key.address(), amount).await?;
        self.sign_and_execute(key, tx, gas).await
    }

    /// Register `sub_address` as a delegated trading account.
    pub async fn set_sub_account(
        &self,
        key: &SuiKeyPair,
        sub_address: &str,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let tx = self.build_set_sub_account(sub_address).await?;
        self.sign_and_execute(key, tx, gas).await
    }

    /// Add margin to the open position on `symbol`.
    pub async fn add_margin(
        &self,
        key: &SuiKeyPair,
        sub_address: &str,
        symbol: &str,
        amount: u128,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let tx = self.build_add_margin(sub_address, symbol, amount).await?;
        self.sign_and_execute(key, tx, gas).await
    }

    // ── Operations, wallet-signed ────────────────────────────────────────

    pub async fn deposit_with_wallet(
        &self,
        wallet: &dyn WalletSigner,
        sender: &str,
        amount: u64,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let tx = self.build_deposit(sender, amount).await?;
        self.wallet_sign_and_execute(wallet, sender, tx, gas).await
    }

    pub async fn withdraw_with_wallet(
        &self,
        wallet: &dyn WalletSigner,
        sender: &str,
        amount: u128,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let tx = self.build_withdraw(sender, amount).await?;
        self.wallet_sign_and_execute(wallet, sender, tx, gas).await
    }

    pub async fn set_sub_account_with_wallet(
        &self,
        wallet: &dyn WalletSigner,
        sender: &str,
        sub_address: &str,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let tx = self.build_set_sub_account(sub_address).await?;
        self.wallet_sign_and_execute(wallet, sender, tx, gas).await
    }

    pub async fn add_margin_with_wallet(
        &self,
        wallet: &dyn WalletSigner,
        sender: &str,
        sub_address: &str,
        symbol: &str,
        amount: u128,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let tx = self.build_add_margin(sub_address, symbol, amount).await?;
        self.wallet_sign_and_execute(wallet, sender, tx, gas).await
    }

    // ── Assembly ─────────────────────────────────────────────────────────

    async fn build_deposit(
        &self,
        sender: &str,
        amount: u64,
    ) -> Result<ProgrammableTransaction, SdkError> {
        let cfg = &self.client.config;
        let mut tx = ProgrammableTransaction::new();

        let coins = self
            .client
            .rpc
            .get_coins(sender, cfg.coin_type)
            .await
            .map_err(SdkError::Chain)?;
        let split = coins::prepare_exact_amount(&mut tx, &coins, cfg.coin_type, amount)?;

        let protocol_config = self.shared(cfg.protocol_config, false).await?;
        let bank = self.shared(cfg.bank, true).await?;
        let tx_indexer = self.shared(cfg.tx_indexer, true).await?;

        let arguments = vec![
            tx.input(protocol_config),
            tx.input(bank),
            tx.input(tx_indexer),
            tx.input(CallArg::pure_bytes(&shared::salt())?),
            tx.input(CallArg::pure_address(sender)?),
            tx.input(CallArg::pure_u64(amount)?),
            Argument::NestedResult(split, 0),
        ];
        self.push_move_call(&mut tx, PerpFunction::Deposit, true, arguments)?;
        Ok(tx)
    }

    async fn build_withdraw(
        &self,
        sender: &str,
        amount: u128,
    ) -> Result<ProgrammableTransaction, SdkError> {
        let cfg = &self.client.config;
        let mut tx = ProgrammableTransaction::new();

        let protocol_config = self.shared(cfg.protocol_config, false).await?;
        let bank = self.shared(cfg.bank, true).await?;
        let tx_indexer = self.shared(cfg.tx_indexer, true).await?;

        let arguments = vec![
            tx.input(protocol_config),
            tx.input(bank),
            tx.input(tx_indexer),
            tx.input(CallArg::pure_bytes(&shared::salt())?),
            tx.input(CallArg::pure_address(sender)?),
            tx.input(CallArg::pure_u128(amount)?),
        ];
        self.push_move_call(&mut tx, PerpFunction::Withdraw, true, arguments)?;
        Ok(tx)
    }

    async fn build_set_sub_account(
        &self,
        sub_address: &str,
    ) -> Result<ProgrammableTransaction, SdkError> {
        let cfg = &self.client.config;
        let mut tx = ProgrammableTransaction::new();

        let protocol_config = self.shared(cfg.protocol_config, false).await?;
        let sub_accounts = self.shared(cfg.sub_accounts, true).await?;

        let arguments = vec![
            tx.input(protocol_config),
            tx.input(sub_accounts),
            tx.input(CallArg::pure_address(sub_address)?),
            tx.input(CallArg::pure_bool(true)?),
        ];
        self.push_move_call(&mut tx, PerpFunction::SetSubAccount, false, arguments)?;
        Ok(tx)
    }

    async fn build_add_margin(
        &self,
        sub_address: &str,
        symbol: &str,
        amount: u128,
    ) -> Result<ProgrammableTransaction, SdkError> {
        let cfg = &self.client.config;
        let markets = self.client.markets();
        let perp_id = markets.perp_id(symbol).await?;
        let feed_id = markets.feed_id(symbol).await?;

        // The oracle may prepend price-update commands; the move call lands
        // after them.
        let mut tx = self
            .client
            .oracle
            .begin_update(&feed_id)
            .await
            .map_err(SdkError::Chain)?;
        let feed_object = self
            .client
            .oracle
            .feed_object_id(symbol, &feed_id)
            .await
            .map_err(SdkError::Chain)?;

        let protocol_config = self.shared(cfg.protocol_config, false).await?;
        let clock = self.shared(SUI_CLOCK_OBJECT_ID, false).await?;
        let perpetual = self.shared(&perp_id, true).await?;
        let bank = self.shared(cfg.bank, true).await?;
        let sub_accounts = self.shared(cfg.sub_accounts, false).await?;
        let tx_indexer = self.shared(cfg.tx_indexer, true).await?;
        let price_oracle = self.shared(&feed_object, true).await?;

        let arguments = vec![
            tx.input(protocol_config),
            tx.input(clock),
            tx.input(perpetual),
            tx.input(bank),
            tx.input(sub_accounts),
            tx.input(tx_indexer),
            tx.input(price_oracle),
            tx.input(CallArg::pure_address(sub_address)?),
            tx.input(CallArg::pure_u128(amount)?),
            tx.input(CallArg::pure_bytes(&shared::salt())?),
        ];
        self.push_move_call(&mut tx, PerpFunction::AddMargin, true, arguments)?;
        Ok(tx)
    }

    fn push_move_call(
        &self,
        tx: &mut ProgrammableTransaction,
        function: PerpFunction,
        with_coin_type_arg: bool,
        arguments: Vec<Argument>,
    ) -> Result<(), SdkError> {
        let cfg = &self.client.config;
        let type_arguments = if with_coin_type_arg {
            vec![parse_struct_tag(cfg.coin_type)?]
        } else {
            Vec::new()
        };
        tx.add_command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package: ObjectId::from_hex(cfg.package_id)?,
            module: function.module().to_string(),
            function: function.function().to_string(),
            type_arguments,
            arguments,
        })));
        Ok(())
    }

    async fn shared(&self, object_id: &str, mutable: bool) -> Result<CallArg, SdkError> {
        let arg = self
            .client
            .shared_objects
            .resolve(&self.client.rpc, object_id, mutable)
            .await?;
        Ok(CallArg::Object(arg))
    }

    // ── Signing + submission ─────────────────────────────────────────────

    async fn sign_and_execute(
        &self,
        key: &SuiKeyPair,
        tx: ProgrammableTransaction,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let sender = key.address().to_string();
        let data = self.finalize(tx, &sender, gas).await?;
        let bytes = data.encode()?;
        let signature = key.sign_transaction_bytes(&bytes)?;
        self.execute(&bytes, signature).await
    }

    async fn wallet_sign_and_execute(
        &self,
        wallet: &dyn WalletSigner,
        sender: &str,
        tx: ProgrammableTransaction,
        gas: GasBudget,
    ) -> Result<TransactionResponse, SdkError> {
        let data = self.finalize(tx, sender, gas).await?;
        let bytes = data.encode()?;
        let signature = wallet
            .sign_transaction(sender, &bytes)
            .await
            .map_err(SdkError::Chain)?;
        self.execute(&bytes, signature).await
    }

    async fn finalize(
        &self,
        tx: ProgrammableTransaction,
        sender: &str,
        gas: GasBudget,
    ) -> Result<TransactionData, SdkError> {
        let payment = self.gas_payment(sender).await?;
        let gas_data = GasData {
            payment,
            owner: ObjectId::from_hex(sender)?,
            price: gas.price,
            budget: gas.budget,
        };
        Ok(TransactionData::new(tx, ObjectId::from_hex(sender)?, gas_data))
    }

    async fn gas_payment(
        &self,
        sender: &str,
    ) -> Result<Vec<crate::chain::types::ObjectRef>, SdkError> {
        let coins = self
            .client
            .rpc
            .get_coins(sender, SUI_COIN_TYPE)
            .await
            .map_err(SdkError::Chain)?;
        if coins.is_empty() {
            return Err(SdkError::Chain(ChainError::NoCoinsAvailable {
                coin_type: SUI_COIN_TYPE.to_string(),
            }));
        }
        Ok(coins
            .iter()
            .take(MAX_GAS_COINS)
            .map(|c| c.object_ref())
            .collect())
    }

    async fn execute(
        &self,
        tx_bytes: &[u8],
        signature: String,
    ) -> Result<TransactionResponse, SdkError> {
        let encoded = BASE64.encode(tx_bytes);
        let response = self
            .client
            .rpc
            .execute_transaction(&encoded, &[signature])
            .await
            .map_err(|e| SdkError::Chain(ChainError::Submission(e.to_string())))?;
        tracing::debug!(digest = %response.digest, "transaction submitted");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::rpc::{ChainRpc, CoinRecord, SharedObjectInfo};
    use crate::chain::types::{ObjectDigest, ObjectRef, TypeTag};
    use crate::error::ChainError;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubChain;

    #[async_trait]
    impl ChainRpc for StubChain {
        async fn get_shared_object(
            &self,
            object_id: &str,
        ) -> Result<SharedObjectInfo, ChainError> {
            Ok(SharedObjectInfo {
                object_id: ObjectId::from_hex(object_id)?,
                initial_shared_version: 7,
            })
        }

        async fn get_object_ref(&self, _object_id: &str) -> Result<ObjectRef, ChainError> {
            unimplemented!()
        }

        async fn get_coins(
            &self,
            _owner: &str,
            _coin_type: &str,
        ) -> Result<Vec<CoinRecord>, ChainError> {
            Ok(vec![
                CoinRecord {
                    object_id: ObjectId([1u8; 32]),
                    version: 1,
                    digest: ObjectDigest(vec![1u8; 32]),
                    balance: 6,
                },
                CoinRecord {
                    object_id: ObjectId([2u8; 32]),
                    version: 2,
                    digest: ObjectDigest(vec![2u8; 32]),
                    balance: 6,
                },
            ])
        }

        async fn reference_gas_price(&self) -> Result<u64, ChainError> {
            Ok(1000)
        }

        async fn execute_transaction(
            &self,
            _tx_bytes_b64: &str,
            _signatures_b64: &[String],
        ) -> Result<TransactionResponse, ChainError> {
            unimplemented!()
        }
    }

    fn test_client() -> crate::client::PerpClient {
        crate::client::PerpClient::builder()
            .rpc(Arc::new(StubChain))
            .build()
            .unwrap()
    }

    fn shared_mutability(tx: &ProgrammableTransaction, input: &Argument) -> bool {
        let Argument::Input(idx) = input else {
            panic!("expected input argument");
        };
        match &tx.inputs[*idx as usize] {
            CallArg::Object(crate::chain::types::ObjectArg::Shared { mutable, .. }) => *mutable,
            other => panic!("expected shared object, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deposit_assembly() {
        let client = test_client();
        let sender = "0xa1";
        let tx = client.chain().build_deposit(sender, 10).await.unwrap();

        // Two coin objects get merged, then split, then the entry call.
        assert_eq!(tx.commands.len(), 3);
        assert!(matches!(tx.commands[0], Command::MergeCoins(_, _)));
        assert!(matches!(tx.commands[1], Command::SplitCoins(_, _)));
        let Command::MoveCall(call) = &tx.commands[2] else {
            panic!("expected move call");
        };
        assert_eq!(call.module, "bank");
        assert_eq!(call.function, "deposit");
        assert_eq!(call.arguments.len(), 7);
        assert_eq!(call.arguments[6], Argument::NestedResult(1, 0));
        assert!(matches!(call.type_arguments[0], TypeTag::Struct(_)));

        assert!(!shared_mutability(&tx, &call.arguments[0]));
        assert!(shared_mutability(&tx, &call.arguments[1]));
        assert!(shared_mutability(&tx, &call.arguments[2]));
    }

    #[tokio::test]
    async fn test_withdraw_assembly() {
        let client = test_client();
        let tx = client.chain().build_withdraw("0xa1", 12).await.unwrap();

        assert_eq!(tx.commands.len(), 1);
        let Command::MoveCall(call) = &tx.commands[0] else {
            panic!("expected move call");
        };
        assert_eq!(call.module, "bank");
        assert_eq!(call.function, "withdraw");
        assert_eq!(call.arguments.len(), 6);
        // Last argument is the pure u128 amount.
        let Argument::Input(idx) = call.arguments[5] else {
            panic!("expected input");
        };
        assert_eq!(tx.inputs[idx as usize], CallArg::pure_u128(12).unwrap());
    }

    #[tokio::test]
    async fn test_set_sub_account_assembly() {
        let client = test_client();
        let tx = client.chain().build_set_sub_account("0xb2").await.unwrap();

        assert_eq!(tx.commands.len(), 1);
        let Command::MoveCall(call) = &tx.commands[0] else {
            panic!("expected move call");
        };
        assert_eq!(call.module, "sub_accounts");
        assert_eq!(call.function, "set_sub_account");
        assert!(call.type_arguments.is_empty());
        assert_eq!(call.arguments.len(), 4);
        let Argument::Input(idx) = call.arguments[3] else {
            panic!("expected input");
        };
        assert_eq!(tx.inputs[idx as usize], CallArg::pure_bool(true).unwrap());
    }

    #[tokio::test]
    async fn test_insufficient_balance_aborts_deposit() {
        let client = test_client();
        let err = client.chain().build_deposit("0xa1", 100).await.unwrap_err();
        assert!(matches!(
            err,
            SdkError::Chain(ChainError::InsufficientBalance { available: 12, required: 100, .. })
        ));
    }
}
