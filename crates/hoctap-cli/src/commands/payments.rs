//! `hoctap packages` and `hoctap buy`.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use hoctap_client::payments::format_vnd;

use super::{connect, Friendly};

pub async fn packages(config: Option<PathBuf>) -> Result<()> {
    let ctx = connect(config)?;
    let packages = ctx.api.packages().await.friendly()?;

    let mut table = Table::new();
    table.set_header(vec!["Mã", "Gói", "Giá", "Thời hạn"]);
    for p in packages.iter().filter(|p| p.is_active) {
        table.add_row(vec![
            Cell::new(&p.id),
            Cell::new(&p.name),
            Cell::new(format_vnd(p.price)),
            Cell::new(format!("{} ngày", p.duration_days)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn buy(config: Option<PathBuf>, package_id: String) -> Result<()> {
    let ctx = connect(config)?;
    anyhow::ensure!(
        ctx.api.session().is_authenticated(),
        "Chưa đăng nhập. Chạy `hoctap login`."
    );
    let link = ctx.api.create_payment(&package_id).await.friendly()?;
    println!("Mã đơn hàng: {}", link.order_code);
    println!("Thanh toán tại: {}", link.checkout_url);
    Ok(())
}
