use std::sync::Arc;

use anyhow::Context;

use afiya_auth::{GateView, LoginForm, SessionContext, SqliteTokenStore, TokenStore};
use afiya_client::HttpAdminApi;
use afiya_dashboard::{
    Dashboard, DashboardConfig, DashboardState, NotificationPoller, TerminalBell, TerminalConfirm,
    TracingNotices,
};
use afiya_sales::OrderStatus;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    afiya_observability::init();

    let config = DashboardConfig::from_env().context("failed to load configuration")?;

    if let Some(parent) = config.storage_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create storage directory {}", parent.display())
        })?;
    }
    let store: Arc<dyn TokenStore> = Arc::new(SqliteTokenStore::open(&config.storage_path));
    let session = SessionContext::restore(store)
        .await
        .context("failed to restore session")?;

    let api = Arc::new(HttpAdminApi::new(config.api_url.clone(), session.clone()));
    let notices = Arc::new(TracingNotices);
    let dashboard = Dashboard::new(
        api.clone(),
        session.clone(),
        notices.clone(),
        Arc::new(TerminalConfirm),
        config.clone(),
    );

    if !session.is_authenticated() {
        match (&config.admin_email, &config.admin_password) {
            (Some(email), Some(password)) => {
                dashboard
                    .login(LoginForm::new(email.clone(), password.clone()))
                    .await
                    .context("login failed")?;
            }
            _ => anyhow::bail!(
                "not logged in; set AFIYA_ADMIN_EMAIL and AFIYA_ADMIN_PASSWORD to sign in"
            ),
        }
    }

    dashboard
        .load_all()
        .await
        .context("failed to load dashboard data")?;
    print_summary(&dashboard.snapshot().await);

    let poller = NotificationPoller::new(api, Arc::new(TerminalBell), notices, config.poll_interval);
    let worker = poller.start();

    let mut gate = session.subscribe();
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for ctrl-c")?;
            tracing::info!("interrupt received; shutting down");
        }
        _ = async {
            while gate.changed().await.is_ok() {
                if *gate.borrow() == GateView::Login {
                    break;
                }
            }
        } => {
            tracing::warn!("session ended; shutting down");
        }
    }

    poller.shutdown();
    dashboard.teardown();
    if let Err(err) = worker.await {
        tracing::error!(error = %err, "notification poller task failed");
    }
    Ok(())
}

fn print_summary(state: &DashboardState) {
    if let Some(stats) = &state.statistics {
        println!("Total users     {}", stats.total_users);
        println!("Total products  {}", stats.total_products);
        println!("Total orders    {}", stats.total_orders);
        println!("Total revenue   AED {:.2}", stats.total_revenue);
        println!();
        println!("Orders by status");
        let by_status = &stats.orders_by_status;
        for (status, count) in [
            (OrderStatus::Pending, by_status.pending),
            (OrderStatus::Processing, by_status.processing),
            (OrderStatus::Shipped, by_status.shipped),
            (OrderStatus::Delivered, by_status.delivered),
        ] {
            println!("  {:<12}{count}", status.label());
        }
        println!();
    }

    println!("Team members    {}", state.team_members.len());
    println!("Messages        {}", state.messages.len());
    println!("Admins          {}", state.admins().len());
    println!("Users           {}", state.customers().len());
    println!("Products        {}", state.products.len());
    println!("Orders          {}", state.orders.len());
}
