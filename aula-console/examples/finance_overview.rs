//! Log in to a running center API and print the current month's finance
//! overview.
//!
//! Start the mock backend first, then point the example at it:
//!
//! ```sh
//! cargo run -p aula-api-mock
//! AULA_API_URL=http://127.0.0.1:3000 cargo run -p aula-console --example finance_overview
//! ```

use aula_client::{ClientConfig, HttpClient};
use aula_console::FinancePanel;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aula_console=info,aula_client=info".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let client = HttpClient::new(&config)?;
    let login = client.login("admin", "admin123").await?;
    tracing::info!(user = %login.user.username, "logged in");

    let panel = FinancePanel::new(Arc::new(client));
    panel.refresh().await;

    let state = panel.state();
    let st = state.read().await;
    println!("Finance overview for {:?}", st.period);
    println!("  student fees billed : {:>14} VND", st.totals.total_student_fees);
    println!("  collected           : {:>14} VND", st.totals.total_paid_amount);
    println!("  outstanding         : {:>14} VND", st.totals.total_remaining_amount);
    println!("  teacher salaries    : {:>14} VND", st.totals.total_teacher_salary);
    println!("  other income        : {:>14} VND", st.totals.total_other_income);
    println!("  other expense       : {:>14} VND", st.totals.total_other_expense);
    println!(
        "  {} teacher payments and {} transactions on the first page",
        st.teacher_payments.len(),
        st.transactions.len()
    );
    Ok(())
}
