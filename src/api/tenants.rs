//! Tenant endpoints: setup, fetch, partial update

use anyhow::{Context, Result};

use super::client::{ApiError, PortalClient};
use crate::models::{Tenant, TenantCreate, TenantUpdate};

/// Create the caller's tenant.
pub async fn create_tenant_data(client: &PortalClient, data: &TenantCreate) -> Result<Tenant> {
    let resp = client.post("/tenants/", data).await?;
    resp.json().await.context("Failed to parse tenant response")
}

/// Fetch the caller's tenant. A 404 means no tenant has been set up yet and
/// is returned as `Ok(None)`, not an error.
pub async fn my_tenant_data(client: &PortalClient) -> Result<Option<Tenant>> {
    match client.get("/tenants/me").await {
        Ok(resp) => {
            let tenant = resp.json().await.context("Failed to parse tenant response")?;
            Ok(Some(tenant))
        }
        Err(e) => match e.downcast_ref::<ApiError>() {
            Some(ApiError::NotFound) => Ok(None),
            _ => Err(e),
        },
    }
}

/// Partially update the caller's tenant. Blank fields are dropped so stored
/// secrets are never overwritten with empty values.
pub async fn update_tenant_data(client: &PortalClient, update: TenantUpdate) -> Result<Tenant> {
    let payload = update.cleaned();
    let resp = client.patch("/tenants/me", &payload).await?;
    resp.json().await.context("Failed to parse tenant response")
}

fn print_tenant(tenant: &Tenant) {
    println!();
    println!("Business:      {}", tenant.name);
    println!("WhatsApp ID:   {}", tenant.whatsapp_phone_number_id);
    println!(
        "Verify token:  {}",
        if tenant.webhook_verify_token.is_some() {
            "set"
        } else {
            "(none)"
        }
    );
    println!(
        "Calendar:      {}",
        tenant.google_calendar_id.as_deref().unwrap_or("(none)")
    );
    println!("Created:       {}", tenant.created_at);
}

/// Show the caller's tenant (prints to stdout).
pub async fn show_tenant() -> Result<()> {
    let client = PortalClient::new().await?;
    match my_tenant_data(&client).await? {
        Some(tenant) => print_tenant(&tenant),
        None => println!("No tenant yet. Run 'bookdesk setup' to create one."),
    }
    Ok(())
}

/// Create a tenant (prints to stdout).
pub async fn setup_tenant(data: TenantCreate) -> Result<()> {
    let client = PortalClient::new().await?;
    let tenant = create_tenant_data(&client, &data).await?;
    println!("Tenant created.");
    print_tenant(&tenant);
    Ok(())
}

/// Apply a partial update (prints to stdout).
pub async fn update_tenant(update: TenantUpdate) -> Result<()> {
    let update = update.cleaned();
    if update.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let client = PortalClient::new().await?;
    let tenant = update_tenant_data(&client, update).await?;
    println!("Settings saved.");
    print_tenant(&tenant);
    Ok(())
}
