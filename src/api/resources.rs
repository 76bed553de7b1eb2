//! Bookable resource endpoints

use anyhow::{Context, Result};

use super::client::PortalClient;
use crate::models::{Resource, ResourceCreate};

/// List the tenant's resources.
pub async fn list_resources_data(client: &PortalClient) -> Result<Vec<Resource>> {
    let resp = client.get("/resources/").await?;
    resp.json()
        .await
        .context("Failed to parse resources response")
}

/// Create a resource.
pub async fn create_resource_data(
    client: &PortalClient,
    data: &ResourceCreate,
) -> Result<Resource> {
    let resp = client.post("/resources/", data).await?;
    resp.json()
        .await
        .context("Failed to parse resource response")
}

/// Delete a resource by id.
pub async fn delete_resource_data(client: &PortalClient, id: i64) -> Result<()> {
    client.delete(&format!("/resources/{}", id)).await?;
    Ok(())
}

/// List resources (prints to stdout).
pub async fn list_resources() -> Result<()> {
    let client = PortalClient::new().await?;
    let resources = list_resources_data(&client).await?;

    if resources.is_empty() {
        println!("(no resources)");
        return Ok(());
    }

    for res in &resources {
        println!("{:>6}  {}", res.id, res.name);
        if let Some(ref desc) = res.description {
            println!("        {}", desc);
        }
        if let Some(ref ext) = res.external_id {
            println!("        external: {}", ext);
        }
    }

    Ok(())
}

/// Create a resource (prints to stdout).
pub async fn add_resource(data: ResourceCreate) -> Result<()> {
    let client = PortalClient::new().await?;
    let resource = create_resource_data(&client, &data).await?;
    println!("Resource {} created (id {}).", resource.name, resource.id);
    Ok(())
}

/// Delete a resource (prints to stdout).
pub async fn remove_resource(id: i64) -> Result<()> {
    let client = PortalClient::new().await?;
    delete_resource_data(&client, id).await?;
    println!("Resource {} deleted.", id);
    Ok(())
}
