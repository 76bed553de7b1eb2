//! API client module for the booking platform

pub mod client;
mod messages;
mod resources;
mod tenants;

pub use messages::{
    list_conversations, list_messages, list_messages_data, read_thread, MessagesQuery,
};
pub use resources::{
    add_resource, create_resource_data, delete_resource_data, list_resources,
    list_resources_data, remove_resource,
};
pub use tenants::{
    create_tenant_data, my_tenant_data, setup_tenant, show_tenant, update_tenant,
    update_tenant_data,
};
