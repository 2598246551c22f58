//! Sui programmable-transaction types and their BCS layout.
//!
//! Variant order in every enum below is wire format, not style — the BCS
//! encoding of an enum is its declaration index. Do not reorder.

use crate::error::ChainError;
use serde::{Deserialize, Serialize, Serializer};

// ─── Object identifiers ──────────────────────────────────────────────────────

/// A 32-byte object id / address. Parses from `0x`-prefixed hex, accepting
/// short forms (`0x6` for the clock) by left-padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub [u8; 32]);

/// Sui addresses share the object-id representation.
pub type SuiAddress = ObjectId;

impl ObjectId {
    pub fn from_hex(s: &str) -> Result<Self, ChainError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.is_empty() || stripped.len() > 64 {
            return Err(ChainError::InvalidObjectId(s.to_string()));
        }
        // Left-pad odd/short forms to the full 64 hex chars.
        let padded = format!("{:0>64}", stripped);
        let bytes = hex::decode(&padded)
            .map_err(|_| ChainError::InvalidObjectId(s.to_string()))?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Object digest, transported as base58 over RPC, raw bytes in BCS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDigest(pub Vec<u8>);

impl ObjectDigest {
    pub fn from_base58(s: &str) -> Result<Self, ChainError> {
        bs58::decode(s)
            .into_vec()
            .map(Self)
            .map_err(|e| ChainError::Encode(format!("bad digest {s}: {e}")))
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }
}

impl Serialize for ObjectDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectDigest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(Vec::<u8>::deserialize(deserializer)?))
    }
}

/// `(id, version, digest)` — the reference form of an owned object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
}

// ─── Call arguments ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectArg {
    ImmOrOwned(ObjectRef),
    Shared {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
    Receiving(ObjectRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    Pure(Vec<u8>),
    Object(ObjectArg),
}

impl CallArg {
    pub fn pure_bool(v: bool) -> Result<Self, ChainError> {
        Ok(Self::Pure(bcs::to_bytes(&v).map_err(encode_err)?))
    }

    pub fn pure_u64(v: u64) -> Result<Self, ChainError> {
        Ok(Self::Pure(bcs::to_bytes(&v).map_err(encode_err)?))
    }

    pub fn pure_u128(v: u128) -> Result<Self, ChainError> {
        Ok(Self::Pure(bcs::to_bytes(&v).map_err(encode_err)?))
    }

    /// `vector<u8>` — length-prefixed.
    pub fn pure_bytes(v: &[u8]) -> Result<Self, ChainError> {
        Ok(Self::Pure(bcs::to_bytes(&v.to_vec()).map_err(encode_err)?))
    }

    /// A Move `address` — 32 raw bytes.
    pub fn pure_address(addr: &str) -> Result<Self, ChainError> {
        let id = ObjectId::from_hex(addr)?;
        Ok(Self::Pure(bcs::to_bytes(&id).map_err(encode_err)?))
    }
}

fn encode_err(e: bcs::Error) -> ChainError {
    ChainError::Encode(e.to_string())
}

// ─── Commands ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(Vec<Argument>, Argument),
    SplitCoins(Argument, Vec<Argument>),
    MergeCoins(Argument, Vec<Argument>),
}

/// An in-progress programmable transaction: ordered inputs + commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

impl ProgrammableTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input and return its index for `Argument::Input`.
    pub fn add_input(&mut self, arg: CallArg) -> u16 {
        self.inputs.push(arg);
        (self.inputs.len() - 1) as u16
    }

    /// Append an input and wrap the index directly.
    pub fn input(&mut self, arg: CallArg) -> Argument {
        Argument::Input(self.add_input(arg))
    }

    /// Append a command and return its index (for `NestedResult`).
    pub fn add_command(&mut self, command: Command) -> u16 {
        self.commands.push(command);
        (self.commands.len() - 1) as u16
    }
}

// ─── Type tags ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructTag {
    pub address: ObjectId,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

/// Parse a non-generic struct type like `0x2::sui::SUI` into a tag.
pub fn parse_struct_tag(s: &str) -> Result<TypeTag, ChainError> {
    let mut parts = s.split("::");
    let (addr, module, name) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(m), Some(n), None) if !m.is_empty() && !n.is_empty() => (a, m, n),
        _ => return Err(ChainError::InvalidTypeTag(s.to_string())),
    };
    Ok(TypeTag::Struct(Box::new(StructTag {
        address: ObjectId::from_hex(addr)?,
        module: module.to_string(),
        name: name.to_string(),
        type_params: Vec::new(),
    })))
}

// ─── Transaction data ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: SuiAddress,
    pub price: u64,
    pub budget: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionExpiration {
    None,
    Epoch(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: SuiAddress,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

impl TransactionData {
    pub fn new(
        tx: ProgrammableTransaction,
        sender: SuiAddress,
        gas_data: GasData,
    ) -> Self {
        Self::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(tx),
            sender,
            gas_data,
            expiration: TransactionExpiration::None,
        })
    }

    /// BCS bytes as signed and submitted.
    pub fn encode(&self) -> Result<Vec<u8>, ChainError> {
        bcs::to_bytes(self).map_err(encode_err)
    }
}

/// Explicit gas parameters for on-chain operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasBudget {
    pub price: u64,
    pub budget: u64,
}
