//! Object identifiers.
//!
//! Every encoded value starts with a big-endian `u16` naming its shape. Numeric types
//! occupy blocks of four: the full payload tag followed by payload-free tags for zero,
//! one and minus one.

#![allow(missing_docs)]

pub const NULL: u16 = 0x0000;
pub const META: u16 = 0x0001;
pub const UNSUPPORTED: u16 = 0x0003;

pub const BYTE: u16 = 0x0010;
pub const BYTE_ZERO: u16 = 0x0011;
pub const BYTE_ONE: u16 = 0x0012;
pub const BYTE_MINUS_ONE: u16 = 0x0013;

pub const SHORT: u16 = 0x0014;
pub const SHORT_ZERO: u16 = 0x0015;
pub const SHORT_ONE: u16 = 0x0016;
pub const SHORT_MINUS_ONE: u16 = 0x0017;

pub const INT: u16 = 0x0018;
pub const INT_ZERO: u16 = 0x0019;
pub const INT_ONE: u16 = 0x001A;
pub const INT_MINUS_ONE: u16 = 0x001B;

pub const LONG: u16 = 0x001C;
pub const LONG_ZERO: u16 = 0x001D;
pub const LONG_ONE: u16 = 0x001E;
pub const LONG_MINUS_ONE: u16 = 0x001F;

pub const HALF: u16 = 0x0020;
pub const HALF_ZERO: u16 = 0x0021;
pub const HALF_ONE: u16 = 0x0022;
pub const HALF_MINUS_ONE: u16 = 0x0023;

pub const FLOAT: u16 = 0x0024;
pub const FLOAT_ZERO: u16 = 0x0025;
pub const FLOAT_ONE: u16 = 0x0026;
pub const FLOAT_MINUS_ONE: u16 = 0x0027;

pub const DOUBLE: u16 = 0x0028;
pub const DOUBLE_ZERO: u16 = 0x0029;
pub const DOUBLE_ONE: u16 = 0x002A;
pub const DOUBLE_MINUS_ONE: u16 = 0x002B;

pub const BOOL_TRUE: u16 = 0x0030;
pub const BOOL_FALSE: u16 = 0x0031;
pub const CHAR: u16 = 0x0032;

pub const BIG_INT: u16 = 0x0040;
pub const BIG_INT_ZERO: u16 = 0x0041;
pub const BIG_INT_ONE: u16 = 0x0042;
pub const BIG_INT_MINUS_ONE: u16 = 0x0043;
pub const DECIMAL: u16 = 0x0044;
pub const RATIO: u16 = 0x0045;

pub const STRING: u16 = 0x0050;
pub const STRING_EMPTY: u16 = 0x0051;
pub const BYTES: u16 = 0x0052;
pub const BYTES_EMPTY: u16 = 0x0053;
pub const BYTE_STREAM: u16 = 0x0054;
pub const REGEX: u16 = 0x0055;
pub const UUID: u16 = 0x0056;

pub const VECTOR: u16 = 0x0060;
pub const VECTOR_EMPTY: u16 = 0x0061;
pub const SET: u16 = 0x0062;
pub const SET_EMPTY: u16 = 0x0063;
pub const MAP: u16 = 0x0064;
pub const MAP_EMPTY: u16 = 0x0065;
pub const INT_ARRAY: u16 = 0x0068;
pub const LONG_ARRAY: u16 = 0x0069;
pub const DOUBLE_ARRAY: u16 = 0x006A;
pub const BOOL_ARRAY: u16 = 0x006B;
pub const SHORT_ARRAY: u16 = 0x006C;
pub const FLOAT_ARRAY: u16 = 0x006D;
pub const CHAR_ARRAY: u16 = 0x006E;
pub const SEQ: u16 = 0x0070;

pub const INSTANT: u16 = 0x0080;
pub const DATE: u16 = 0x0081;
pub const TIME: u16 = 0x0082;
pub const DATE_TIME: u16 = 0x0083;
pub const OFFSET_DATE_TIME: u16 = 0x0084;
pub const DURATION: u16 = 0x0085;
pub const PERIOD: u16 = 0x0086;
pub const OFFSET_TIME: u16 = 0x0087;
pub const ZONED_DATE_TIME: u16 = 0x0088;
pub const ZONE_ID: u16 = 0x0089;

pub const THROWABLE: u16 = 0x0090;
pub const EX_INFO: u16 = 0x0091;
pub const FUTURE: u16 = 0x00A0;

pub const IPV4_ADDR: u16 = 0x0100;
pub const IPV6_ADDR: u16 = 0x0101;
pub const SOCKET_ADDR_V4: u16 = 0x0102;

/// First OID available to host extensions.
pub const EXTENSION_MIN: u16 = 0x8000;

/// Is `oid` handled by the decoder without consulting the registry?
pub fn is_builtin(oid: u16) -> bool { name(oid).is_some() && !is_adapter(oid) }

/// Is `oid` one of the bundled adapter tags?
pub fn is_adapter(oid: u16) -> bool { oid >= 0x0100 && oid <= 0x01FF }

/// Is `oid` in the range reserved for host extensions?
pub fn is_extension(oid: u16) -> bool { oid >= EXTENSION_MIN }

/// Human-readable name of a known OID.
pub fn name(oid: u16) -> Option<&'static str> {
    let n = match oid {
        NULL => "NULL",
        META => "META",
        UNSUPPORTED => "UNSUPPORTED",
        BYTE => "BYTE",
        BYTE_ZERO => "BYTE_ZERO",
        BYTE_ONE => "BYTE_ONE",
        BYTE_MINUS_ONE => "BYTE_MINUS_ONE",
        SHORT => "SHORT",
        SHORT_ZERO => "SHORT_ZERO",
        SHORT_ONE => "SHORT_ONE",
        SHORT_MINUS_ONE => "SHORT_MINUS_ONE",
        INT => "INT",
        INT_ZERO => "INT_ZERO",
        INT_ONE => "INT_ONE",
        INT_MINUS_ONE => "INT_MINUS_ONE",
        LONG => "LONG",
        LONG_ZERO => "LONG_ZERO",
        LONG_ONE => "LONG_ONE",
        LONG_MINUS_ONE => "LONG_MINUS_ONE",
        HALF => "HALF",
        HALF_ZERO => "HALF_ZERO",
        HALF_ONE => "HALF_ONE",
        HALF_MINUS_ONE => "HALF_MINUS_ONE",
        FLOAT => "FLOAT",
        FLOAT_ZERO => "FLOAT_ZERO",
        FLOAT_ONE => "FLOAT_ONE",
        FLOAT_MINUS_ONE => "FLOAT_MINUS_ONE",
        DOUBLE => "DOUBLE",
        DOUBLE_ZERO => "DOUBLE_ZERO",
        DOUBLE_ONE => "DOUBLE_ONE",
        DOUBLE_MINUS_ONE => "DOUBLE_MINUS_ONE",
        BOOL_TRUE => "BOOL_TRUE",
        BOOL_FALSE => "BOOL_FALSE",
        CHAR => "CHAR",
        BIG_INT => "BIG_INT",
        BIG_INT_ZERO => "BIG_INT_ZERO",
        BIG_INT_ONE => "BIG_INT_ONE",
        BIG_INT_MINUS_ONE => "BIG_INT_MINUS_ONE",
        DECIMAL => "DECIMAL",
        RATIO => "RATIO",
        STRING => "STRING",
        STRING_EMPTY => "STRING_EMPTY",
        BYTES => "BYTES",
        BYTES_EMPTY => "BYTES_EMPTY",
        BYTE_STREAM => "BYTE_STREAM",
        REGEX => "REGEX",
        UUID => "UUID",
        VECTOR => "VECTOR",
        VECTOR_EMPTY => "VECTOR_EMPTY",
        SET => "SET",
        SET_EMPTY => "SET_EMPTY",
        MAP => "MAP",
        MAP_EMPTY => "MAP_EMPTY",
        INT_ARRAY => "INT_ARRAY",
        LONG_ARRAY => "LONG_ARRAY",
        DOUBLE_ARRAY => "DOUBLE_ARRAY",
        BOOL_ARRAY => "BOOL_ARRAY",
        SHORT_ARRAY => "SHORT_ARRAY",
        FLOAT_ARRAY => "FLOAT_ARRAY",
        CHAR_ARRAY => "CHAR_ARRAY",
        SEQ => "SEQ",
        INSTANT => "INSTANT",
        DATE => "DATE",
        TIME => "TIME",
        DATE_TIME => "DATE_TIME",
        OFFSET_DATE_TIME => "OFFSET_DATE_TIME",
        DURATION => "DURATION",
        PERIOD => "PERIOD",
        OFFSET_TIME => "OFFSET_TIME",
        ZONED_DATE_TIME => "ZONED_DATE_TIME",
        ZONE_ID => "ZONE_ID",
        THROWABLE => "THROWABLE",
        EX_INFO => "EX_INFO",
        FUTURE => "FUTURE",
        IPV4_ADDR => "IPV4_ADDR",
        IPV6_ADDR => "IPV6_ADDR",
        SOCKET_ADDR_V4 => "SOCKET_ADDR_V4",
        _ => return None,
    };
    Some(n)
}
