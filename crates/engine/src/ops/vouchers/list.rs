use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    EngineError, ResultEngine, Voucher, VoucherItem, VoucherKind, voucher_items, vouchers,
};

use super::super::Engine;

/// Filter for [`Engine::list_vouchers`].
#[derive(Clone, Copy, Debug, Default)]
pub struct VoucherListFilter {
    pub kind: Option<VoucherKind>,
    /// Maximum number of vouchers returned; `None` returns all.
    pub limit: Option<u64>,
}

impl Engine {
    /// Return a voucher header together with its line items.
    pub async fn voucher_detail(
        &self,
        voucher_number: &str,
    ) -> ResultEngine<(Voucher, Vec<VoucherItem>)> {
        let model = vouchers::Entity::find_by_id(voucher_number)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("voucher not exists".to_string()))?;
        let voucher = Voucher::try_from(model)?;

        let item_models = voucher_items::Entity::find()
            .filter(voucher_items::Column::VoucherNumber.eq(voucher_number))
            .all(&self.database)
            .await?;

        let mut items = Vec::with_capacity(item_models.len());
        for item_model in item_models {
            items.push(VoucherItem::try_from(item_model)?);
        }
        Ok((voucher, items))
    }

    /// List voucher headers, most recent date first.
    pub async fn list_vouchers(&self, filter: VoucherListFilter) -> ResultEngine<Vec<Voucher>> {
        let mut query = vouchers::Entity::find()
            .order_by_desc(vouchers::Column::Date)
            .order_by_desc(vouchers::Column::CreatedAt);

        if let Some(kind) = filter.kind {
            query = query.filter(vouchers::Column::Kind.eq(kind.as_str()));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let models = query.all(&self.database).await?;
        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Voucher::try_from(model)?);
        }
        Ok(out)
    }
}
