//! Adapters for the legacy voucher form encodings.
//!
//! The warehouse front-end submits voucher lines in one of two shapes:
//! indexed formset fields (`form-0-product`, `form-0-quantity`, ...) or
//! parallel arrays (`product_id[]`, `quantity[]`, ...). Both are marshalled
//! here into [`engine::CreateVoucherCmd`] before reaching the engine.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use engine::{CreateVoucherCmd, LineRequest, VoucherKind, VoucherMeta};

/// Parse a decimal quantity string into minor units (hundredths).
///
/// Accepts at most two fractional digits; the ledger stores nothing finer.
pub(crate) fn parse_quantity_minor(raw: &str) -> Result<i64, String> {
    let trimmed = raw.trim();
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (trimmed, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(format!("invalid quantity \"{raw}\""));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(format!("invalid quantity \"{raw}\""));
    }
    if frac_part.len() > 2 {
        return Err(format!(
            "quantity \"{raw}\" has more than two decimal places"
        ));
    }

    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| format!("invalid quantity \"{raw}\""))?
    };

    let mut frac: i64 = 0;
    if !frac_part.is_empty() {
        frac = frac_part
            .parse()
            .map_err(|_| format!("invalid quantity \"{raw}\""))?;
        if frac_part.len() == 1 {
            frac *= 10;
        }
    }

    whole
        .checked_mul(100)
        .and_then(|minor| minor.checked_add(frac))
        .ok_or_else(|| format!("quantity \"{raw}\" out of range"))
}

fn field<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn optional_field(pairs: &[(String, String)], name: &str) -> Option<String> {
    field(pairs, name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[derive(Default)]
struct RawLine {
    product: Option<String>,
    quantity: Option<String>,
    machine: Option<String>,
    machine_unit: Option<String>,
}

fn formset_lines(pairs: &[(String, String)]) -> BTreeMap<u32, RawLine> {
    let mut rows: BTreeMap<u32, RawLine> = BTreeMap::new();

    for (key, value) in pairs {
        let Some(rest) = key.strip_prefix("form-") else {
            continue;
        };
        let Some((index, name)) = rest.split_once('-') else {
            continue;
        };
        let Ok(index) = index.parse::<u32>() else {
            continue;
        };

        let row = rows.entry(index).or_default();
        match name {
            "product" => row.product = Some(value.clone()),
            "quantity" => row.quantity = Some(value.clone()),
            "machine_name" => row.machine = Some(value.clone()),
            "machine_unit" => row.machine_unit = Some(value.clone()),
            _ => {}
        }
    }

    rows
}

fn array_lines(pairs: &[(String, String)]) -> Vec<RawLine> {
    let mut products = Vec::new();
    let mut quantities = Vec::new();
    let mut machines = Vec::new();
    let mut machine_units = Vec::new();

    for (key, value) in pairs {
        match key.as_str() {
            "product_id[]" => products.push(value.clone()),
            "quantity[]" => quantities.push(value.clone()),
            "machine[]" => machines.push(value.clone()),
            "machine_unit[]" => machine_units.push(value.clone()),
            _ => {}
        }
    }

    products
        .into_iter()
        .enumerate()
        .map(|(i, product)| RawLine {
            product: Some(product),
            quantity: quantities.get(i).cloned(),
            machine: machines.get(i).cloned(),
            machine_unit: machine_units.get(i).cloned(),
        })
        .collect()
}

fn into_request(row: RawLine) -> Result<Option<LineRequest>, String> {
    // Blank extra formset rows carry no product; they are skipped, not
    // rejected.
    let product = match row.product.as_deref().map(str::trim) {
        Some(product) if !product.is_empty() => product.to_string(),
        _ => return Ok(None),
    };

    let quantity = match row.quantity.as_deref().map(str::trim) {
        Some(quantity) if !quantity.is_empty() => quantity,
        _ => return Err(format!("missing quantity for product \"{product}\"")),
    };
    let quantity_minor = parse_quantity_minor(quantity)?;

    let mut line = LineRequest::new(product, quantity_minor);
    line.machine = row
        .machine
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string);
    line.machine_unit = row
        .machine_unit
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string);
    Ok(Some(line))
}

/// Extract voucher lines from either submission style.
///
/// Formset fields win when both styles are present; that matches the legacy
/// handler's precedence.
pub(crate) fn lines_from_pairs(pairs: &[(String, String)]) -> Result<Vec<LineRequest>, String> {
    let formset = formset_lines(pairs);

    let rows: Vec<RawLine> = if formset.is_empty() {
        array_lines(pairs)
    } else {
        formset.into_values().collect()
    };

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(line) = into_request(row)? {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Build a full create command from urlencoded form pairs.
pub(crate) fn voucher_cmd_from_pairs(
    pairs: &[(String, String)],
) -> Result<CreateVoucherCmd, String> {
    let voucher_number = optional_field(pairs, "voucher_number")
        .ok_or_else(|| "missing voucher_number".to_string())?;

    let kind = field(pairs, "kind").ok_or_else(|| "missing kind".to_string())?;
    let kind = VoucherKind::try_from(kind.trim()).map_err(|err| err.to_string())?;

    let date = field(pairs, "date").ok_or_else(|| "missing date".to_string())?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date \"{}\"", date.trim()))?;

    let lines = lines_from_pairs(pairs)?;

    Ok(CreateVoucherCmd {
        voucher_number,
        kind,
        date,
        lines,
        meta: VoucherMeta {
            supplier: optional_field(pairs, "supplier"),
            department: optional_field(pairs, "department"),
            customer: optional_field(pairs, "customer"),
            recipient: optional_field(pairs, "recipient"),
            supplier_voucher_number: optional_field(pairs, "supplier_voucher_number"),
            notes: optional_field(pairs, "notes"),
        },
    })
}
