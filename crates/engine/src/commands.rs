//! Command structs for engine operations.
//!
//! These types group parameters for write operations (product creation,
//! voucher create/update), keeping call sites readable and avoiding long
//! argument lists.

use chrono::NaiveDate;

use crate::VoucherKind;

/// One requested voucher line: a product and an unsigned quantity.
///
/// This is the uniform shape every submission style is marshalled into
/// before it reaches the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineRequest {
    pub product_id: String,
    pub quantity_minor: i64,
    pub machine: Option<String>,
    pub machine_unit: Option<String>,
}

impl LineRequest {
    #[must_use]
    pub fn new(product_id: impl Into<String>, quantity_minor: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity_minor,
            machine: None,
            machine_unit: None,
        }
    }

    #[must_use]
    pub fn machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = Some(machine.into());
        self
    }

    #[must_use]
    pub fn machine_unit(mut self, machine_unit: impl Into<String>) -> Self {
        self.machine_unit = Some(machine_unit.into());
        self
    }
}

/// Header fields shared by voucher creation and update.
#[derive(Clone, Debug, Default)]
pub struct VoucherMeta {
    pub supplier: Option<String>,
    pub department: Option<String>,
    pub customer: Option<String>,
    pub recipient: Option<String>,
    pub supplier_voucher_number: Option<String>,
    pub notes: Option<String>,
}

/// Create a voucher together with its lines.
#[derive(Clone, Debug)]
pub struct CreateVoucherCmd {
    pub voucher_number: String,
    pub kind: VoucherKind,
    pub date: NaiveDate,
    pub lines: Vec<LineRequest>,
    pub meta: VoucherMeta,
}

impl CreateVoucherCmd {
    #[must_use]
    pub fn new(voucher_number: impl Into<String>, kind: VoucherKind, date: NaiveDate) -> Self {
        Self {
            voucher_number: voucher_number.into(),
            kind,
            date,
            lines: Vec::new(),
            meta: VoucherMeta::default(),
        }
    }

    #[must_use]
    pub fn line(mut self, line: LineRequest) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn lines(mut self, lines: Vec<LineRequest>) -> Self {
        self.lines = lines;
        self
    }

    #[must_use]
    pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
        self.meta.supplier = Some(supplier.into());
        self
    }

    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.meta.department = Some(department.into());
        self
    }

    #[must_use]
    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.meta.customer = Some(customer.into());
        self
    }

    #[must_use]
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.meta.recipient = Some(recipient.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.meta.notes = Some(notes.into());
        self
    }
}

/// Update an existing voucher: replace its lines and optionally patch
/// header fields.
///
/// There is deliberately no `kind` field here. The stored voucher's kind is
/// authoritative; changing it would re-sign every line's past effect.
#[derive(Clone, Debug)]
pub struct UpdateVoucherCmd {
    pub voucher_number: String,
    pub lines: Vec<LineRequest>,
    /// `None` leaves the stored date unchanged.
    pub date: Option<NaiveDate>,
    /// Text patches: `None` keeps the stored value, `Some` replaces it
    /// (empty strings clear the field).
    pub supplier: Option<String>,
    pub department: Option<String>,
    pub customer: Option<String>,
    pub recipient: Option<String>,
    pub notes: Option<String>,
}

impl UpdateVoucherCmd {
    #[must_use]
    pub fn new(voucher_number: impl Into<String>, lines: Vec<LineRequest>) -> Self {
        Self {
            voucher_number: voucher_number.into(),
            lines,
            date: None,
            supplier: None,
            department: None,
            customer: None,
            recipient: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Create a product ledger entry.
#[derive(Clone, Debug)]
pub struct NewProductCmd {
    pub product_id: String,
    pub name: String,
    pub initial_quantity_minor: i64,
    pub minimum_threshold_minor: i64,
    pub maximum_threshold_minor: i64,
    pub unit_price_minor: i64,
    pub category: Option<String>,
    pub unit: Option<String>,
}

impl NewProductCmd {
    #[must_use]
    pub fn new(product_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            initial_quantity_minor: 0,
            minimum_threshold_minor: 0,
            maximum_threshold_minor: 0,
            unit_price_minor: 0,
            category: None,
            unit: None,
        }
    }

    #[must_use]
    pub fn initial_quantity_minor(mut self, quantity_minor: i64) -> Self {
        self.initial_quantity_minor = quantity_minor;
        self
    }

    #[must_use]
    pub fn minimum_threshold_minor(mut self, threshold_minor: i64) -> Self {
        self.minimum_threshold_minor = threshold_minor;
        self
    }

    #[must_use]
    pub fn maximum_threshold_minor(mut self, threshold_minor: i64) -> Self {
        self.maximum_threshold_minor = threshold_minor;
        self
    }

    #[must_use]
    pub fn unit_price_minor(mut self, price_minor: i64) -> Self {
        self.unit_price_minor = price_minor;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}
