//! Enumerations shared by the whole object model
//!
//! Every enumeration carries a stable integer code so it can be exported to
//! a host runtime as a named constant.

macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $prefix:literal {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr => $cname:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Integer code of the variant
            pub fn code(self) -> i32 {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Variant for an integer code
            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $(v if v == $value => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Exported constant names paired with their codes
            pub fn constants() -> Vec<(String, i32)> {
                vec![$((format!("{}_{}", $prefix, $cname), $value),)+]
            }
        }
    };
}

int_enum! {
    /// File flavour of a book
    pub enum BookType: "BOOK_TYPE" {
        Xls = 0 => "XLS",
        Xlsx = 1 => "XLSX",
    }
}

impl BookType {
    /// Number of addressable rows
    pub fn max_rows(self) -> i32 {
        match self {
            BookType::Xls => 65_536,
            BookType::Xlsx => 1_048_576,
        }
    }

    /// Number of addressable columns
    pub fn max_cols(self) -> i32 {
        match self {
            BookType::Xls => 256,
            BookType::Xlsx => 16_384,
        }
    }
}

int_enum! {
    /// Kind of a sheet
    pub enum SheetType: "SHEETTYPE" {
        Sheet = 0 => "SHEET",
        Chart = 1 => "CHART",
        Unknown = 2 => "UNKNOWN",
    }
}

int_enum! {
    /// Kind of value held by a cell
    pub enum CellType: "CELLTYPE" {
        Empty = 0 => "EMPTY",
        Number = 1 => "NUMBER",
        String = 2 => "STRING",
        Boolean = 3 => "BOOLEAN",
        Blank = 4 => "BLANK",
        Error = 5 => "ERROR",
    }
}

int_enum! {
    /// Error value stored in a cell
    pub enum ErrorType: "ERRORTYPE" {
        Null = 0x0 => "NULL",
        Div0 = 0x7 => "DIV_0",
        Value = 0xF => "VALUE",
        Ref = 0x17 => "REF",
        Name = 0x1D => "NAME",
        Num = 0x24 => "NUM",
        Na = 0x2A => "NA",
        NoError = 0xFF => "NOERROR",
    }
}

int_enum! {
    /// Horizontal alignment
    pub enum AlignH: "ALIGNH" {
        General = 0 => "GENERAL",
        Left = 1 => "LEFT",
        Center = 2 => "CENTER",
        Right = 3 => "RIGHT",
        Fill = 4 => "FILL",
        Justify = 5 => "JUSTIFY",
        Merge = 6 => "MERGE",
        Distributed = 7 => "DISTRIBUTED",
    }
}

int_enum! {
    /// Vertical alignment
    pub enum AlignV: "ALIGNV" {
        Top = 0 => "TOP",
        Center = 1 => "CENTER",
        Bottom = 2 => "BOTTOM",
        Justify = 3 => "JUSTIFY",
        Distributed = 4 => "DISTRIBUTED",
    }
}

int_enum! {
    /// Border line style
    pub enum BorderStyle: "BORDERSTYLE" {
        None = 0 => "NONE",
        Thin = 1 => "THIN",
        Medium = 2 => "MEDIUM",
        Dashed = 3 => "DASHED",
        Dotted = 4 => "DOTTED",
        Thick = 5 => "THICK",
        Double = 6 => "DOUBLE",
        Hair = 7 => "HAIR",
    }
}

int_enum! {
    /// Diagonal border direction
    pub enum BorderDiagonal: "BORDERDIAGONAL" {
        None = 0 => "NONE",
        Down = 1 => "DOWN",
        Up = 2 => "UP",
        Both = 3 => "BOTH",
    }
}

int_enum! {
    /// Cell fill pattern
    pub enum FillPattern: "FILLPATTERN" {
        None = 0 => "NONE",
        Solid = 1 => "SOLID",
        Gray50 = 2 => "GRAY50",
        Gray75 = 3 => "GRAY75",
        Gray25 = 4 => "GRAY25",
        HorStripe = 5 => "HORSTRIPE",
        VerStripe = 6 => "VERSTRIPE",
    }
}

int_enum! {
    /// Font script position
    pub enum Script: "SCRIPT" {
        Normal = 0 => "NORMAL",
        Super = 1 => "SUPER",
        Sub = 2 => "SUB",
    }
}

int_enum! {
    /// Font underline style
    pub enum Underline: "UNDERLINE" {
        None = 0 => "NONE",
        Single = 1 => "SINGLE",
        Double = 2 => "DOUBLE",
        SingleAcc = 0x21 => "SINGLEACC",
        DoubleAcc = 0x22 => "DOUBLEACC",
    }
}

int_enum! {
    /// Auto filter column mode
    pub enum FilterType: "FILTER" {
        Value = 0 => "VALUE",
        Top10 = 1 => "TOP10",
        Custom = 2 => "CUSTOM",
        Dynamic = 3 => "DYNAMIC",
        Color = 4 => "COLOR",
        Icon = 5 => "ICON",
        Ext = 6 => "EXT",
        NotSet = 7 => "NOT_SET",
    }
}

int_enum! {
    /// Comparison operator of a custom filter
    pub enum FilterOperator: "OPERATOR" {
        Equal = 0 => "EQUAL",
        GreaterThan = 1 => "GREATER_THAN",
        GreaterThanOrEqual = 2 => "GREATER_THAN_OR_EQUAL",
        LessThan = 3 => "LESS_THAN",
        LessThanOrEqual = 4 => "LESS_THAN_OR_EQUAL",
        NotEqual = 5 => "NOT_EQUAL",
    }
}

int_enum! {
    /// Conditional formatting rule kind
    pub enum CfType: "CFORMAT" {
        BeginWith = 0 => "BEGINWITH",
        ContainsBlanks = 1 => "CONTAINSBLANKS",
        ContainsErrors = 2 => "CONTAINSERRORS",
        ContainsText = 3 => "CONTAINSTEXT",
        DuplicateValues = 4 => "DUPLICATEVALUES",
        EndsWith = 5 => "ENDSWITH",
        Expression = 6 => "EXPRESSION",
        NotContainsBlanks = 7 => "NOTCONTAINSBLANKS",
        NotContainsErrors = 8 => "NOTCONTAINSERRORS",
        NotContainsText = 9 => "NOTCONTAINSTEXT",
        UniqueValues = 10 => "UNIQUEVALUES",
    }
}

int_enum! {
    /// Comparison operator of a conditional formatting rule
    pub enum CfOperator: "CFOPERATOR" {
        LessThan = 0 => "LESSTHAN",
        LessThanOrEqual = 1 => "LESSTHANOREQUAL",
        Equal = 2 => "EQUAL",
        NotEqual = 3 => "NOTEQUAL",
        GreaterThanOrEqual = 4 => "GREATERTHANOREQUAL",
        GreaterThan = 5 => "GREATERTHAN",
        Between = 6 => "BETWEEN",
        NotBetween = 7 => "NOTBETWEEN",
        ContainsText = 8 => "CONTAINSTEXT",
        NotContains = 9 => "NOTCONTAINS",
        BeginsWith = 10 => "BEGINSWITH",
        EndsWith = 11 => "ENDSWITH",
    }
}

impl CfOperator {
    /// Whether the operator compares against a range
    pub fn takes_two_values(self) -> bool {
        matches!(self, CfOperator::Between | CfOperator::NotBetween)
    }
}

int_enum! {
    /// Relative date period of a time-period rule
    pub enum CfTimePeriod: "CFTP" {
        Last7Days = 0 => "LAST7DAYS",
        LastMonth = 1 => "LASTMONTH",
        LastWeek = 2 => "LASTWEEK",
        NextMonth = 3 => "NEXTMONTH",
        NextWeek = 4 => "NEXTWEEK",
        ThisMonth = 5 => "THISMONTH",
        ThisWeek = 6 => "THISWEEK",
        Today = 7 => "TODAY",
        Tomorrow = 8 => "TOMORROW",
        Yesterday = 9 => "YESTERDAY",
    }
}

int_enum! {
    /// Value kind of a color-scale stop
    pub enum CfvoType: "CFVO" {
        Min = 0 => "MIN",
        Max = 1 => "MAX",
        Formula = 2 => "FORMULA",
        Number = 3 => "NUMBER",
        Percent = 4 => "PERCENT",
        Percentile = 5 => "PERCENTILE",
    }
}

int_enum! {
    /// Kind of a form control
    pub enum ObjectType: "OBJECT" {
        Unknown = 0 => "UNKNOWN",
        Button = 1 => "BUTTON",
        CheckBox = 2 => "CHECKBOX",
        DropDown = 3 => "DROP",
        GroupBox = 4 => "GBOX",
        Label = 5 => "LABEL",
        List = 6 => "LIST",
        Radio = 7 => "RADIO",
        Scroll = 8 => "SCROLL",
        Spin = 9 => "SPIN",
        EditBox = 10 => "EDITBOX",
        Dialog = 11 => "DIALOG",
    }
}

int_enum! {
    /// Check state of a check box or radio button
    pub enum CheckedType: "CHECKEDTYPE" {
        Unchecked = 0 => "UNCHECKED",
        Checked = 1 => "CHECKED",
        Mixed = 2 => "MIXED",
    }
}

/// Built-in number format identifiers
pub mod num_format {
    pub const GENERAL: i32 = 0;
    pub const NUMBER: i32 = 1;
    pub const NUMBER_D2: i32 = 2;
    pub const NUMBER_SEP: i32 = 3;
    pub const NUMBER_SEP_D2: i32 = 4;
    pub const PERCENT: i32 = 9;
    pub const PERCENT_D2: i32 = 10;
    pub const SCIENTIFIC_D2: i32 = 11;
    pub const DATE: i32 = 14;
    pub const CUSTOM_D_MON_YY: i32 = 15;
    pub const CUSTOM_D_MON: i32 = 16;
    pub const CUSTOM_MON_YY: i32 = 17;
    pub const CUSTOM_HMM_AM: i32 = 18;
    pub const CUSTOM_HMMSS_AM: i32 = 19;
    pub const CUSTOM_HMM: i32 = 20;
    pub const CUSTOM_HMMSS: i32 = 21;
    pub const CUSTOM_MDYYYY_HMM: i32 = 22;
    pub const TEXT: i32 = 49;

    /// First identifier handed out for custom formats
    pub const FIRST_CUSTOM: i32 = 164;

    /// Whether a built-in format renders dates or times
    pub fn is_date(id: i32) -> bool {
        matches!(id, DATE..=CUSTOM_MDYYYY_HMM) || (45..=47).contains(&id)
    }

    pub(crate) fn constants() -> Vec<(String, i32)> {
        [
            ("GENERAL", GENERAL),
            ("NUMBER", NUMBER),
            ("NUMBER_D2", NUMBER_D2),
            ("NUMBER_SEP", NUMBER_SEP),
            ("NUMBER_SEP_D2", NUMBER_SEP_D2),
            ("PERCENT", PERCENT),
            ("PERCENT_D2", PERCENT_D2),
            ("SCIENTIFIC_D2", SCIENTIFIC_D2),
            ("DATE", DATE),
            ("CUSTOM_D_MON_YY", CUSTOM_D_MON_YY),
            ("CUSTOM_D_MON", CUSTOM_D_MON),
            ("CUSTOM_MON_YY", CUSTOM_MON_YY),
            ("CUSTOM_HMM_AM", CUSTOM_HMM_AM),
            ("CUSTOM_HMMSS_AM", CUSTOM_HMMSS_AM),
            ("CUSTOM_HMM", CUSTOM_HMM),
            ("CUSTOM_HMMSS", CUSTOM_HMMSS),
            ("CUSTOM_MDYYYY_HMM", CUSTOM_MDYYYY_HMM),
            ("TEXT", TEXT),
        ]
        .into_iter()
        .map(|(name, code)| (format!("NUMFORMAT_{name}"), code))
        .collect()
    }
}

/// Every exported constant of the object model
pub fn constants() -> Vec<(String, i32)> {
    let mut all = Vec::new();
    all.extend(BookType::constants());
    all.extend(SheetType::constants());
    all.extend(CellType::constants());
    all.extend(ErrorType::constants());
    all.extend(AlignH::constants());
    all.extend(AlignV::constants());
    all.extend(BorderStyle::constants());
    all.extend(BorderDiagonal::constants());
    all.extend(FillPattern::constants());
    all.extend(Script::constants());
    all.extend(Underline::constants());
    all.extend(FilterType::constants());
    all.extend(FilterOperator::constants());
    all.extend(CfType::constants());
    all.extend(CfOperator::constants());
    all.extend(CfTimePeriod::constants());
    all.extend(CfvoType::constants());
    all.extend(ObjectType::constants());
    all.extend(CheckedType::constants());
    all.extend(num_format::constants());
    all.extend(crate::Color::constants());
    all
}
