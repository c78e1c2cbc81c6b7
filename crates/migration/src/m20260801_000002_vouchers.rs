use sea_orm_migration::prelude::*;

use crate::m20260801_000001_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Vouchers {
    Table,
    VoucherNumber,
    Kind,
    Date,
    Supplier,
    Department,
    Customer,
    Recipient,
    SupplierVoucherNumber,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum VoucherItems {
    Table,
    Id,
    VoucherNumber,
    ProductId,
    QuantityAddedMinor,
    QuantityDisbursedMinor,
    UnitPriceMinor,
    Machine,
    MachineUnit,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vouchers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vouchers::VoucherNumber)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vouchers::Kind).string().not_null())
                    .col(ColumnDef::new(Vouchers::Date).date().not_null())
                    .col(ColumnDef::new(Vouchers::Supplier).string())
                    .col(ColumnDef::new(Vouchers::Department).string())
                    .col(ColumnDef::new(Vouchers::Customer).string())
                    .col(ColumnDef::new(Vouchers::Recipient).string())
                    .col(ColumnDef::new(Vouchers::SupplierVoucherNumber).string())
                    .col(ColumnDef::new(Vouchers::Notes).string())
                    .col(ColumnDef::new(Vouchers::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Vouchers::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-vouchers-date")
                    .table(Vouchers::Table)
                    .col(Vouchers::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VoucherItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VoucherItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VoucherItems::VoucherNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VoucherItems::ProductId).string().not_null())
                    .col(ColumnDef::new(VoucherItems::QuantityAddedMinor).big_integer())
                    .col(ColumnDef::new(VoucherItems::QuantityDisbursedMinor).big_integer())
                    .col(
                        ColumnDef::new(VoucherItems::UnitPriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VoucherItems::Machine).string())
                    .col(ColumnDef::new(VoucherItems::MachineUnit).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-voucher_items-voucher_number")
                            .from(VoucherItems::Table, VoucherItems::VoucherNumber)
                            .to(Vouchers::Table, Vouchers::VoucherNumber)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-voucher_items-product_id")
                            .from(VoucherItems::Table, VoucherItems::ProductId)
                            .to(Products::Table, Products::ProductId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-voucher_items-voucher_number")
                    .table(VoucherItems::Table)
                    .col(VoucherItems::VoucherNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-voucher_items-product_id")
                    .table(VoucherItems::Table)
                    .col(VoucherItems::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VoucherItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vouchers::Table).to_owned())
            .await?;
        Ok(())
    }
}
