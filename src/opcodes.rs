//! The opcode registry: a static table mapping every mnemonic to the
//! shape of the operands it takes.  This is the single source of
//! truth for operand arity and for the enumerated-field value sets;
//! the statement parser contains no per-opcode code.
use std::collections::HashMap;
use std::sync::OnceLock;

/// A closed set of allowed field names for one opcode family.  Kept
/// closed (rather than accepting any identifier) so that an invalid
/// field is caught at parse time with a precise diagnostic.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FieldSet {
    pub(crate) name: &'static str,
    pub(crate) members: &'static [&'static str],
}

impl FieldSet {
    pub(crate) fn contains(&self, field: &str) -> bool {
        self.members.contains(&field)
    }
}

/// One slot in a fixed-arity operand sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperandKind {
    /// A decimal integer literal.
    Numeric,
    /// A label identifier.
    Label,
    /// One of integer, quoted-string or hex-bytes literal.
    ByteValue,
    /// An enumerated field name drawn from the given set.
    Field(&'static FieldSet),
}

/// What a mnemonic demands of the rest of its line.
///
/// The variable-length shapes consume greedily until the next line
/// break; because the lexer emits line breaks as tokens, every such
/// list has an unambiguous terminator and no lookahead or
/// backtracking is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperandShape {
    /// No operands at all.
    None,
    /// Exactly the listed operands, in order.
    Fixed(&'static [OperandKind]),
    /// The `txn`/`gtxns`/`gtxn` shape: one field name which is either
    /// a scalar transaction field (nothing follows) or an array
    /// transaction field (a numeric index must follow).  Which form
    /// applies is decided by set membership of the field name, not by
    /// operand count.
    TxnField { leading_group_index: bool },
    /// Zero or more integer literals until end of line.
    NumericList,
    /// Zero or more integer/string/hex literals until end of line.
    ByteValueList,
    /// One or more label identifiers until end of line.
    LabelList,
}

pub(crate) static TXN_FIELDS: FieldSet = FieldSet {
    name: "transaction field",
    members: &[
        "Sender",
        "Fee",
        "FirstValid",
        "FirstValidTime",
        "LastValid",
        "Note",
        "Lease",
        "Receiver",
        "Amount",
        "CloseRemainderTo",
        "VotePK",
        "SelectionPK",
        "VoteFirst",
        "VoteLast",
        "VoteKeyDilution",
        "Type",
        "TypeEnum",
        "XferAsset",
        "AssetAmount",
        "AssetSender",
        "AssetReceiver",
        "AssetCloseTo",
        "GroupIndex",
        "TxID",
        "ApplicationID",
        "OnCompletion",
        "NumAppArgs",
        "NumAccounts",
        "ApprovalProgram",
        "ClearStateProgram",
        "RekeyTo",
        "ConfigAsset",
        "ConfigAssetTotal",
        "ConfigAssetDecimals",
        "ConfigAssetDefaultFrozen",
        "ConfigAssetUnitName",
        "ConfigAssetName",
        "ConfigAssetURL",
        "ConfigAssetMetadataHash",
        "ConfigAssetManager",
        "ConfigAssetReserve",
        "ConfigAssetFreeze",
        "ConfigAssetClawback",
        "FreezeAsset",
        "FreezeAssetAccount",
        "FreezeAssetFrozen",
        "NumAssets",
        "NumApplications",
        "GlobalNumUint",
        "GlobalNumByteSlice",
        "LocalNumUint",
        "LocalNumByteSlice",
        "ExtraProgramPages",
        "Nonparticipation",
        "NumLogs",
        "CreatedAssetID",
        "CreatedApplicationID",
        "LastLog",
        "StateProofPK",
        "NumApprovalProgramPages",
        "NumClearStateProgramPages",
    ],
};

pub(crate) static TXN_ARRAY_FIELDS: FieldSet = FieldSet {
    name: "transaction array field",
    members: &[
        "ApplicationArgs",
        "Accounts",
        "Assets",
        "Applications",
        "Logs",
        "ApprovalProgramPages",
        "ClearStateProgramPages",
    ],
};

pub(crate) static GLOBAL_FIELDS: FieldSet = FieldSet {
    name: "global field",
    members: &[
        "MinTxnFee",
        "MinBalance",
        "MaxTxnLife",
        "ZeroAddress",
        "GroupSize",
        "LogicSigVersion",
        "Round",
        "LatestTimestamp",
        "CurrentApplicationID",
        "CreatorAddress",
        "CurrentApplicationAddress",
        "GroupID",
        "OpcodeBudget",
        "CallerApplicationID",
        "CallerApplicationAddress",
        "AssetCreateMinBalance",
        "AssetOptInMinBalance",
        "GenesisHash",
        "PayoutsEnabled",
        "PayoutsGoOnlineFee",
        "PayoutsPercent",
        "PayoutsMinBalance",
        "PayoutsMaxBalance",
    ],
};

pub(crate) static BLOCK_FIELDS: FieldSet = FieldSet {
    name: "block field",
    members: &[
        "BlkSeed",
        "BlkTimestamp",
        "BlkProposer",
        "BlkFeesCollected",
        "BlkBonus",
        "BlkBranch",
        "BlkFeeSink",
        "BlkProtocol",
        "BlkTxnCounter",
        "BlkProposerPayout",
    ],
};

pub(crate) static ASSET_PARAMS: FieldSet = FieldSet {
    name: "asset parameter",
    members: &[
        "AssetTotal",
        "AssetDecimals",
        "AssetDefaultFrozen",
        "AssetUnitName",
        "AssetName",
        "AssetURL",
        "AssetMetadataHash",
        "AssetManager",
        "AssetReserve",
        "AssetFreeze",
        "AssetClawback",
        "AssetCreator",
    ],
};

pub(crate) static APP_PARAMS: FieldSet = FieldSet {
    name: "application parameter",
    members: &[
        "AppApprovalProgram",
        "AppClearStateProgram",
        "AppGlobalNumUint",
        "AppGlobalNumByteSlice",
        "AppLocalNumUint",
        "AppLocalNumByteSlice",
        "AppExtraProgramPages",
        "AppCreator",
        "AppAddress",
    ],
};

pub(crate) static ACCOUNT_PARAMS: FieldSet = FieldSet {
    name: "account parameter",
    members: &[
        "AcctBalance",
        "AcctMinBalance",
        "AcctAuthAddr",
        "AcctTotalNumUint",
        "AcctTotalNumByteSlice",
        "AcctTotalExtraAppPages",
        "AcctTotalAppsCreated",
        "AcctTotalAppsOptedIn",
        "AcctTotalAssetsCreated",
        "AcctTotalAssets",
        "AcctTotalBoxes",
        "AcctTotalBoxBytes",
        "AcctIncentiveEligible",
        "AcctLastProposed",
        "AcctLastHeartbeat",
    ],
};

pub(crate) static VOTER_PARAMS: FieldSet = FieldSet {
    name: "voter parameter",
    members: &["VoterBalance", "VoterIncentiveEligible"],
};

pub(crate) static ASSET_HOLDING_FIELDS: FieldSet = FieldSet {
    name: "asset holding field",
    members: &["AssetBalance", "AssetFrozen"],
};

pub(crate) static ECDSA_CURVES: FieldSet = FieldSet {
    name: "ECDSA curve",
    members: &["Secp256k1", "Secp256r1"],
};

pub(crate) static EC_GROUPS: FieldSet = FieldSet {
    name: "elliptic curve group",
    members: &["BN254g1", "BN254g2", "BLS12_381g1", "BLS12_381g2"],
};

pub(crate) static MIMC_CONFIGS: FieldSet = FieldSet {
    name: "MiMC configuration",
    members: &["BN254Mp110", "BLS12_381Mp111"],
};

pub(crate) static VRF_STANDARDS: FieldSet = FieldSet {
    name: "VRF standard",
    members: &["VrfAlgorand"],
};

pub(crate) static BASE64_ENCODINGS: FieldSet = FieldSet {
    name: "base64 encoding",
    members: &["URLEncoding", "StdEncoding"],
};

pub(crate) static JSON_REF_TYPES: FieldSet = FieldSet {
    name: "JSON value type",
    members: &["JSONString", "JSONUint64", "JSONObject"],
};

const ZERO_OPERAND_OPCODES: &[&str] = &[
    "sha256",
    "keccak256",
    "sha512_256",
    "err",
    "ed25519verify",
    // Math
    "+",
    "-",
    "*",
    "/",
    "%",
    // Boolean
    "<",
    "<=",
    ">",
    ">=",
    "&&",
    "||",
    "==",
    "!=",
    "!",
    "len",
    "itob",
    "btoi",
    // Bitwise
    "&",
    "|",
    "^",
    "~",
    "mulw",
    "addw",
    "divmodw",
    "intc_0",
    "intc_1",
    "intc_2",
    "intc_3",
    "bytec_0",
    "bytec_1",
    "bytec_2",
    "bytec_3",
    "arg_0",
    "arg_1",
    "arg_2",
    "arg_3",
    "gaids",
    "loads",
    "gaid",
    "stores",
    "return",
    "assert",
    "pop",
    "dup",
    "dup2",
    "swap",
    "select",
    "concat",
    "substring3",
    "getbit",
    "setbit",
    "getbyte",
    "setbyte",
    "extract_uint16",
    "extract_uint32",
    "extract_uint64",
    "replace3",
    "extract3",
    "balance",
    "app_opted_in",
    "app_local_get",
    "app_local_get_ex",
    "app_global_get",
    "app_global_get_ex",
    "app_local_put",
    "app_global_put",
    "app_local_del",
    "app_global_del",
    "online_stake",
    "min_balance",
    "ed25519verify_bare",
    "retsub",
    "shl",
    "shr",
    "sqrt",
    "bitlen",
    "exp",
    "expw",
    "bsqrt",
    "divw",
    "sha3_256",
    // Wide byte math and comparison
    "b+",
    "b-",
    "b/",
    "b*",
    "b<",
    "b>",
    "b<=",
    "b>=",
    "b==",
    "b!=",
    "b%",
    "b|",
    "b&",
    "b^",
    "b~",
    "bzero",
    "log",
    "itxn_begin",
    "itxn_submit",
    "itxn_next",
    "box_create",
    "box_extract",
    "box_replace",
    "box_del",
    "box_len",
    "box_get",
    "box_put",
    "args",
    "gloadss",
    "box_splice",
    "box_resize",
];

const SINGLE_NUMERIC_OPCODES: &[&str] = &[
    "bytec",
    "arg",
    "gloads",
    "bury",
    "popn",
    "dupn",
    "dig",
    "cover",
    "uncover",
    "replace2",
    "pushint",
    "frame_dig",
    "frame_bury",
    // pseudo-opcode but included for completeness
    "int",
    "intc",
    "load",
    "store",
];

const DOUBLE_NUMERIC_OPCODES: &[&str] = &["extract", "substring", "gload", "proto"];

/// Branch instructions taking exactly one target label.
const SINGLE_LABEL_OPCODES: &[&str] = &["b", "bz", "bnz", "callsub"];

/// Multi-way branches taking one or more target labels.
const MULTI_LABEL_OPCODES: &[&str] = &["match", "switch"];

const NUMERIC_LIST_OPCODES: &[&str] = &["intcblock", "pushints"];

const BYTE_VALUE_LIST_OPCODES: &[&str] = &["bytecblock", "pushbytess"];

const NUMERIC: &[OperandKind] = &[OperandKind::Numeric];
const NUMERIC_2: &[OperandKind] = &[OperandKind::Numeric, OperandKind::Numeric];
const LABEL: &[OperandKind] = &[OperandKind::Label];
const BYTE_VALUE: &[OperandKind] = &[OperandKind::ByteValue];

/// Fixed-shape entries for the enumerated-field opcode families.
/// Each family is data here, not code in the parser.
const FIELD_OPCODES: &[(&str, &[OperandKind])] = &[
    ("ecdsa_verify", &[OperandKind::Field(&ECDSA_CURVES)]),
    ("ecdsa_pk_decompress", &[OperandKind::Field(&ECDSA_CURVES)]),
    ("ecdsa_pk_recover", &[OperandKind::Field(&ECDSA_CURVES)]),
    ("ec_add", &[OperandKind::Field(&EC_GROUPS)]),
    ("ec_scalar_mul", &[OperandKind::Field(&EC_GROUPS)]),
    ("ec_pairing_check", &[OperandKind::Field(&EC_GROUPS)]),
    ("ec_multi_scalar_mul", &[OperandKind::Field(&EC_GROUPS)]),
    ("ec_subgroup_check", &[OperandKind::Field(&EC_GROUPS)]),
    ("ec_map_to", &[OperandKind::Field(&EC_GROUPS)]),
    ("mimc", &[OperandKind::Field(&MIMC_CONFIGS)]),
    ("vrf_verify", &[OperandKind::Field(&VRF_STANDARDS)]),
    ("base64_decode", &[OperandKind::Field(&BASE64_ENCODINGS)]),
    ("json_ref", &[OperandKind::Field(&JSON_REF_TYPES)]),
    ("asset_holding_get", &[OperandKind::Field(&ASSET_HOLDING_FIELDS)]),
    ("asset_params_get", &[OperandKind::Field(&ASSET_PARAMS)]),
    ("app_params_get", &[OperandKind::Field(&APP_PARAMS)]),
    ("acct_params_get", &[OperandKind::Field(&ACCOUNT_PARAMS)]),
    ("voter_params_get", &[OperandKind::Field(&VOTER_PARAMS)]),
    ("global", &[OperandKind::Field(&GLOBAL_FIELDS)]),
    ("block", &[OperandKind::Field(&BLOCK_FIELDS)]),
    // Transaction-field access with a statically known shape.  Each
    // variant gets its one specific combination of group index, field
    // name and array index; nothing is derived dynamically.
    ("itxn", &[OperandKind::Field(&TXN_FIELDS)]),
    ("itxn_field", &[OperandKind::Field(&TXN_FIELDS)]),
    ("itxna", &[OperandKind::Field(&TXN_ARRAY_FIELDS)]),
    ("txna", &[OperandKind::Field(&TXN_ARRAY_FIELDS), OperandKind::Numeric]),
    ("txnas", &[OperandKind::Field(&TXN_ARRAY_FIELDS)]),
    ("itxnas", &[OperandKind::Field(&TXN_ARRAY_FIELDS)]),
    ("gtxnsa", &[OperandKind::Field(&TXN_ARRAY_FIELDS), OperandKind::Numeric]),
    ("gtxnsas", &[OperandKind::Field(&TXN_ARRAY_FIELDS)]),
    ("gitxn", &[OperandKind::Numeric, OperandKind::Field(&TXN_FIELDS)]),
    ("gtxnas", &[OperandKind::Numeric, OperandKind::Field(&TXN_ARRAY_FIELDS)]),
    ("gitxnas", &[OperandKind::Numeric, OperandKind::Field(&TXN_ARRAY_FIELDS)]),
    (
        "gtxna",
        &[
            OperandKind::Numeric,
            OperandKind::Field(&TXN_ARRAY_FIELDS),
            OperandKind::Numeric,
        ],
    ),
    (
        "gitxna",
        &[
            OperandKind::Numeric,
            OperandKind::Field(&TXN_ARRAY_FIELDS),
            OperandKind::Numeric,
        ],
    ),
];

fn registry() -> &'static HashMap<&'static str, OperandShape> {
    static REGISTRY: OnceLock<HashMap<&'static str, OperandShape>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> HashMap<&'static str, OperandShape> {
    let mut table: HashMap<&'static str, OperandShape> = HashMap::new();
    let mut insert = |mnemonic: &'static str, shape: OperandShape| {
        if table.insert(mnemonic, shape).is_some() {
            panic!("opcode registry lists mnemonic '{mnemonic}' more than once");
        }
    };

    for mnemonic in ZERO_OPERAND_OPCODES {
        insert(mnemonic, OperandShape::None);
    }
    for mnemonic in SINGLE_NUMERIC_OPCODES {
        insert(mnemonic, OperandShape::Fixed(NUMERIC));
    }
    for mnemonic in DOUBLE_NUMERIC_OPCODES {
        insert(mnemonic, OperandShape::Fixed(NUMERIC_2));
    }
    for mnemonic in SINGLE_LABEL_OPCODES {
        insert(mnemonic, OperandShape::Fixed(LABEL));
    }
    for mnemonic in MULTI_LABEL_OPCODES {
        insert(mnemonic, OperandShape::LabelList);
    }
    for mnemonic in NUMERIC_LIST_OPCODES {
        insert(mnemonic, OperandShape::NumericList);
    }
    for mnemonic in BYTE_VALUE_LIST_OPCODES {
        insert(mnemonic, OperandShape::ByteValueList);
    }
    for (mnemonic, kinds) in FIELD_OPCODES {
        insert(mnemonic, OperandShape::Fixed(kinds));
    }
    insert("pushbytes", OperandShape::Fixed(BYTE_VALUE));
    insert(
        "txn",
        OperandShape::TxnField {
            leading_group_index: false,
        },
    );
    insert(
        "gtxns",
        OperandShape::TxnField {
            leading_group_index: false,
        },
    );
    insert(
        "gtxn",
        OperandShape::TxnField {
            leading_group_index: true,
        },
    );
    table
}

/// Case-sensitive, exact-match lookup.  Fuzzy matching and
/// suggestions are a diagnostics-layer concern, not the registry's.
pub(crate) fn lookup(mnemonic: &str) -> Option<&'static OperandShape> {
    registry().get(mnemonic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_builds_without_duplicates() {
        // build_registry panics on a duplicate mnemonic.
        assert!(!registry().is_empty());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("dup").is_some());
        assert!(lookup("Dup").is_none());
        assert!(lookup("DUP").is_none());
    }

    #[test]
    fn unknown_mnemonics_are_not_found() {
        assert!(lookup("frobnicate").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn symbol_mnemonics_are_registered() {
        assert_eq!(lookup("+"), Some(&OperandShape::None));
        assert_eq!(lookup("b<="), Some(&OperandShape::None));
        assert_eq!(lookup("!="), Some(&OperandShape::None));
    }

    #[test]
    fn fixed_numeric_shapes() {
        assert_eq!(lookup("pushint"), Some(&OperandShape::Fixed(NUMERIC)));
        assert_eq!(lookup("substring"), Some(&OperandShape::Fixed(NUMERIC_2)));
    }

    #[test]
    fn branch_shapes() {
        assert_eq!(lookup("b"), Some(&OperandShape::Fixed(LABEL)));
        assert_eq!(lookup("match"), Some(&OperandShape::LabelList));
        assert_eq!(lookup("switch"), Some(&OperandShape::LabelList));
    }

    #[test]
    fn transaction_family_shapes() {
        assert_eq!(
            lookup("txn"),
            Some(&OperandShape::TxnField {
                leading_group_index: false
            })
        );
        assert_eq!(
            lookup("gtxn"),
            Some(&OperandShape::TxnField {
                leading_group_index: true
            })
        );
        match lookup("gtxna") {
            Some(OperandShape::Fixed(kinds)) => {
                assert_eq!(kinds.len(), 3);
                assert_eq!(kinds[0], OperandKind::Numeric);
                assert_eq!(kinds[1], OperandKind::Field(&TXN_ARRAY_FIELDS));
                assert_eq!(kinds[2], OperandKind::Numeric);
            }
            other => panic!("unexpected shape for gtxna: {other:?}"),
        }
    }

    #[test]
    fn field_sets_are_closed() {
        assert!(TXN_FIELDS.contains("Sender"));
        assert!(!TXN_FIELDS.contains("sender"));
        assert!(TXN_ARRAY_FIELDS.contains("ApplicationArgs"));
        assert!(!TXN_FIELDS.contains("ApplicationArgs"));
        assert!(ECDSA_CURVES.contains("Secp256k1"));
        assert!(!ECDSA_CURVES.contains("Secp256K1"));
    }

    #[test]
    fn variable_list_shapes() {
        assert_eq!(lookup("intcblock"), Some(&OperandShape::NumericList));
        assert_eq!(lookup("bytecblock"), Some(&OperandShape::ByteValueList));
        assert_eq!(lookup("pushbytes"), Some(&OperandShape::Fixed(BYTE_VALUE)));
    }
}
