//! Static code tables.
//!
//! Each table is an enum with one variant per named code plus a catch-all
//! arm that keeps the raw value, so an unknown code never fails to decode.

use serde::Serialize;

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $repr:ty {
            $($variant:ident = $code:literal => $label:literal,)+
            _ => $fallback:ident($fallback_label:literal),
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant,)+
            $fallback($repr),
        }

        impl $name {
            pub fn from_code(code: $repr) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::$fallback(other),
                }
            }

            pub fn code(self) -> $repr {
                match self {
                    $(Self::$variant => $code,)+
                    Self::$fallback(code) => code,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::$fallback(_) => $fallback_label,
                }
            }

            pub fn is_known(self) -> bool {
                !matches!(self, Self::$fallback(_))
            }
        }
    };
}

code_table! {
    /// Link function codes sent with PRM=1.
    pub enum PrimaryFunction: u8 {
        ResetRemoteLink = 0 => "Reset of Remote Link",
        ResetUserProcess = 1 => "Reset of User Process",
        TestLink = 2 => "Test Function For Link",
        UserData = 3 => "User Data",
        UnconfirmedUserData = 4 => "Unconfirmed User Data",
        RequestLinkStatus = 9 => "Request Link Status",
        _ => Reserved("-"),
    }
}

code_table! {
    /// Link function codes sent with PRM=0.
    pub enum SecondaryFunction: u8 {
        Ack = 0 => "ACK",
        Nak = 1 => "NAK",
        StatusOfLink = 11 => "Status of Link",
        LinkServiceNotFunctioning = 14 => "Link Service Not Functioning",
        LinkServiceNotUsed = 15 => "Link Service Not Used or Implemented",
        _ => Reserved("-"),
    }
}

code_table! {
    /// Application layer function codes.
    pub enum FunctionCode: u8 {
        Confirm = 0 => "Confirm",
        Read = 1 => "Read",
        Write = 2 => "Write",
        Select = 3 => "Select",
        Operate = 4 => "Operate",
        DirectOperate = 5 => "Direct Operate",
        DirectOperateNoAck = 6 => "Direct Operate No ACK",
        ImmediateFreeze = 7 => "Immediate Freeze",
        ImmediateFreezeNoAck = 8 => "Immediate Freeze No ACK",
        FreezeAndClear = 9 => "Freeze and Clear",
        FreezeAndClearNoAck = 10 => "Freeze and Clear No ACK",
        FreezeWithTime = 11 => "Freeze With Time",
        FreezeWithTimeNoAck = 12 => "Freeze With Time No ACK",
        ColdRestart = 13 => "Cold Restart",
        WarmRestart = 14 => "Warm Restart",
        InitializeData = 15 => "Initialize Data",
        InitializeApplication = 16 => "Initialize Application",
        StartApplication = 17 => "Start Application",
        StopApplication = 18 => "Stop Application",
        SaveConfiguration = 19 => "Save Configuration",
        EnableSpontaneous = 20 => "Enable Spontaneous Msg",
        DisableSpontaneous = 21 => "Disable Spontaneous Msg",
        AssignClasses = 22 => "Assign Classes",
        DelayMeasurement = 23 => "Delay Measurement",
        RecordCurrentTime = 24 => "Record Current Time",
        OpenFile = 25 => "Open File",
        CloseFile = 26 => "Close File",
        DeleteFile = 27 => "Delete File",
        GetFileInfo = 28 => "Get File Info",
        AuthenticateFile = 29 => "Authenticate File",
        AbortFile = 30 => "Abort File",
        ActivateConfig = 31 => "Activate Config",
        AuthenticationRequest = 32 => "Authentication Request",
        AuthenticationError = 33 => "Authentication Error",
        Response = 129 => "Response",
        UnsolicitedResponse = 130 => "Unsolicited Response",
        AuthenticationResponse = 131 => "Authentication Response",
        _ => Unrecognized(""),
    }
}

code_table! {
    /// Single-bit internal indications; first octet in the high byte.
    pub enum IinFlag: u16 {
        BroadcastReceived = 0x0100 => "Broadcast message rx'd",
        Class1Available = 0x0200 => "Class 1 Data Available",
        Class2Available = 0x0400 => "Class 2 Data Available",
        Class3Available = 0x0800 => "Class 3 Data Available",
        TimeSyncRequired = 0x1000 => "Time Sync Req'd from Master",
        LocalControl = 0x2000 => "Outputs in Local Mode",
        DeviceTrouble = 0x4000 => "Device Trouble",
        DeviceRestart = 0x8000 => "Device Restart",
        NoFunctionCodeSupport = 0x0001 => "Function code not implemented",
        ObjectUnknown = 0x0002 => "Requested Objects Unknown",
        ParameterError = 0x0004 => "Parameters Invalid or Out of Range",
        EventBufferOverflow = 0x0008 => "Event Buffer Overflow",
        AlreadyExecuting = 0x0010 => "Operation Already Executing",
        ConfigCorrupt = 0x0020 => "Device Configuration Corrupt",
        Reserved6 = 0x0040 => "Reserved",
        Reserved7 = 0x0080 => "Reserved",
        _ => Unmatched(""),
    }
}

code_table! {
    /// Qualifier prefix code (bits 6-4).
    pub enum PrefixCode: u8 {
        NoPrefix = 0 => "Objects packed without a prefix",
        Index8 = 1 => "Objects prefixed with 1-octet index",
        Index16 = 2 => "Objects prefixed with 2-octet index",
        Index32 = 3 => "Objects prefixed with 4-octet index",
        Size8 = 4 => "Objects prefixed with 1-octet object size",
        Size16 = 5 => "Objects prefixed with 2-octet object size",
        Size32 = 6 => "Objects prefixed with 4-octet object size",
        _ => Reserved("Reserved"),
    }
}

code_table! {
    /// Qualifier range-specifier code (bits 3-0).
    pub enum RangeSpecifier: u8 {
        StartStop8 = 0 => "8-bit Start and Stop Indices in Range Field",
        StartStop16 = 1 => "16-bit Start and Stop Indices in Range Field",
        StartStop32 = 2 => "32-bit Start and Stop Indices in Range Field",
        Absolute8 = 3 => "8-bit Absolute Address in Range Field",
        Absolute16 = 4 => "16-bit Absolute Address in Range Field",
        Absolute32 = 5 => "32-bit Absolute Address in Range Field",
        NoRange = 6 => "Length of Range field is 0 (no range field)",
        Count8 = 7 => "8-bit Single Field Quantity",
        Count16 = 8 => "16-bit Single Field Quantity",
        Count32 = 9 => "32-bit Single Field Quantity",
        FreeFormat = 11 => "Free-format Qualifier, range field has 1 octet count of objects",
        _ => Reserved("Reserved"),
    }
}

/// Link function, read against the table the PRM bit selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkFunction {
    Primary(PrimaryFunction),
    Secondary(SecondaryFunction),
}

impl LinkFunction {
    pub fn from_control(primary: bool, code: u8) -> Self {
        if primary {
            LinkFunction::Primary(PrimaryFunction::from_code(code))
        } else {
            LinkFunction::Secondary(SecondaryFunction::from_code(code))
        }
    }

    pub fn code(self) -> u8 {
        match self {
            LinkFunction::Primary(function) => function.code(),
            LinkFunction::Secondary(function) => function.code(),
        }
    }

    /// Table name, `"-"` for reserved or obsolete codes.
    pub fn name(self) -> &'static str {
        match self {
            LinkFunction::Primary(function) => function.name(),
            LinkFunction::Secondary(function) => function.name(),
        }
    }

    /// `"<name> (<decimal code>)"`.
    pub fn label(self) -> String {
        format!("{} ({})", self.name(), self.code())
    }
}

impl FunctionCode {
    /// Codes only an outstation sends.
    pub fn is_response(self) -> bool {
        matches!(
            self,
            FunctionCode::Response
                | FunctionCode::UnsolicitedResponse
                | FunctionCode::AuthenticationResponse
        )
    }

    /// `"<name> (0x<hex code>)"`; unrecognized codes keep an empty name.
    pub fn label(self) -> String {
        format!("{} (0x{:02x})", self.name(), self.code())
    }
}

impl PrefixCode {
    pub fn label(self) -> String {
        format!("{} ({})", self.name(), self.code())
    }
}

impl RangeSpecifier {
    /// Width of the range field in octets, as DNP3 defines it.
    pub fn field_width(self) -> usize {
        match self {
            RangeSpecifier::StartStop8 => 2,
            RangeSpecifier::StartStop16 => 4,
            RangeSpecifier::StartStop32 => 8,
            RangeSpecifier::Absolute8 => 1,
            RangeSpecifier::Absolute16 => 2,
            RangeSpecifier::Absolute32 => 4,
            RangeSpecifier::NoRange => 0,
            RangeSpecifier::Count8 => 1,
            RangeSpecifier::Count16 => 2,
            RangeSpecifier::Count32 => 4,
            RangeSpecifier::FreeFormat => 1,
            RangeSpecifier::Reserved(_) => 0,
        }
    }

    pub fn label(self) -> String {
        format!("{} ({})", self.name(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FunctionCode, IinFlag, LinkFunction, PrefixCode, PrimaryFunction, RangeSpecifier,
        SecondaryFunction,
    };

    #[test]
    fn link_function_table_follows_prm() {
        assert_eq!(
            LinkFunction::from_control(true, 4),
            LinkFunction::Primary(PrimaryFunction::UnconfirmedUserData)
        );
        assert_eq!(
            LinkFunction::from_control(false, 0),
            LinkFunction::Secondary(SecondaryFunction::Ack)
        );
        assert_eq!(LinkFunction::from_control(true, 4).label(), "Unconfirmed User Data (4)");
        assert_eq!(LinkFunction::from_control(false, 11).label(), "Status of Link (11)");
    }

    #[test]
    fn reserved_link_function_keeps_code() {
        let function = LinkFunction::from_control(true, 7);
        assert_eq!(function, LinkFunction::Primary(PrimaryFunction::Reserved(7)));
        assert_eq!(function.label(), "- (7)");
        assert_eq!(LinkFunction::from_control(false, 5).label(), "- (5)");
    }

    #[test]
    fn every_code_round_trips() {
        for code in 0..=u8::MAX {
            assert_eq!(FunctionCode::from_code(code).code(), code);
        }
        for code in 0..16 {
            assert_eq!(LinkFunction::from_control(true, code).code(), code);
            assert_eq!(LinkFunction::from_control(false, code).code(), code);
            assert_eq!(RangeSpecifier::from_code(code).code(), code);
        }
        for code in 0..8 {
            assert_eq!(PrefixCode::from_code(code).code(), code);
        }
    }

    #[test]
    fn function_code_labels() {
        assert_eq!(FunctionCode::from_code(1).label(), "Read (0x01)");
        assert_eq!(FunctionCode::from_code(129).label(), "Response (0x81)");
        assert!(FunctionCode::from_code(129).is_response());
        assert!(!FunctionCode::from_code(1).is_response());
    }

    #[test]
    fn unrecognized_function_has_empty_name() {
        let function = FunctionCode::from_code(0x22);
        assert_eq!(function, FunctionCode::Unrecognized(0x22));
        assert!(!function.is_known());
        assert_eq!(function.label(), " (0x22)");
    }

    #[test]
    fn function_table_size() {
        let known = (0..=u8::MAX)
            .filter(|code| FunctionCode::from_code(*code).is_known())
            .count();
        assert_eq!(known, 37);
    }

    #[test]
    fn iin_flags_cover_sixteen_bits() {
        for bit in 0..16 {
            let flag = IinFlag::from_code(1 << bit);
            assert!(flag.is_known(), "bit {bit} has no label");
        }
        assert_eq!(IinFlag::from_code(0x0102), IinFlag::Unmatched(0x0102));
    }

    #[test]
    fn qualifier_tables() {
        assert_eq!(PrefixCode::from_code(7), PrefixCode::Reserved(7));
        assert_eq!(PrefixCode::from_code(0).label(), "Objects packed without a prefix (0)");
        assert_eq!(RangeSpecifier::from_code(10).name(), "Reserved");
        assert_eq!(RangeSpecifier::from_code(6).field_width(), 0);
        assert_eq!(RangeSpecifier::from_code(11).field_width(), 1);
        assert_eq!(RangeSpecifier::from_code(2).field_width(), 8);
    }
}
