//! Built-in mapping specs for common core resources.
//!
//! These mirror the writable fields of the corresponding
//! `terraform-provider-kubernetes` resources. Anything else can be added at
//! startup with [`SpecRegistry::register_table_yaml`](crate::SpecRegistry::register_table_yaml).

use crate::{AttrType, CoercionKind, MappingSpec};

const BOOL: AttrType = AttrType::scalar(CoercionKind::Bool);
const INT: AttrType = AttrType::scalar(CoercionKind::Int);
const STRING: AttrType = AttrType::scalar(CoercionKind::String);
const STRING_MAP: AttrType = AttrType::scalar(CoercionKind::StringMap);
const STRING_LIST: AttrType = AttrType::list(CoercionKind::String);

/// All built-in specs with their registry names.
pub fn specs() -> Vec<(&'static str, MappingSpec)> {
    vec![
        ("kubernetes_namespace_v1", namespace()),
        ("kubernetes_config_map_v1", config_map()),
        ("kubernetes_secret_v1", secret()),
        ("kubernetes_service_account_v1", service_account()),
        ("kubernetes_service_v1", service()),
    ]
}

fn metadata(namespaced: bool) -> MappingSpec {
    let spec = MappingSpec::nested()
        .attribute("annotations", STRING_MAP)
        .attribute("generate_name", STRING)
        .attribute("labels", STRING_MAP)
        .attribute("name", STRING);
    if namespaced {
        spec.attribute("namespace", STRING)
    } else {
        spec
    }
}

fn local_object_reference() -> MappingSpec {
    MappingSpec::nested().attribute("name", STRING)
}

fn namespace() -> MappingSpec {
    MappingSpec::new("kubernetes_namespace_v1").block("metadata", metadata(false))
}

fn config_map() -> MappingSpec {
    MappingSpec::new("kubernetes_config_map_v1")
        .attribute("binary_data", STRING_MAP)
        .attribute("data", STRING_MAP)
        .attribute("immutable", BOOL)
        .block("metadata", metadata(true))
}

fn secret() -> MappingSpec {
    MappingSpec::new("kubernetes_secret_v1")
        .attribute("binary_data", STRING_MAP)
        .attribute("data", STRING_MAP)
        .attribute("immutable", BOOL)
        .attribute("type", STRING)
        .block("metadata", metadata(true))
}

fn service_account() -> MappingSpec {
    MappingSpec::new("kubernetes_service_account_v1")
        .attribute("automount_service_account_token", BOOL)
        .block("image_pull_secret", local_object_reference())
        .block("metadata", metadata(true))
        .block("secret", local_object_reference())
}

fn service() -> MappingSpec {
    let port = MappingSpec::nested()
        .attribute("app_protocol", STRING)
        .attribute("name", STRING)
        .attribute("node_port", INT)
        .attribute("port", INT)
        .attribute("protocol", STRING)
        .attribute("target_port", STRING);

    let spec = MappingSpec::nested()
        .attribute("allocate_load_balancer_node_ports", BOOL)
        .attribute("cluster_ip", STRING)
        .attribute("external_name", STRING)
        .attribute("external_traffic_policy", STRING)
        .attribute("health_check_node_port", INT)
        .attribute("internal_traffic_policy", STRING)
        .attribute("load_balancer_class", STRING)
        .attribute("load_balancer_ip", STRING)
        .attribute("load_balancer_source_ranges", STRING_LIST)
        .attribute("publish_not_ready_addresses", BOOL)
        .attribute("selector", STRING_MAP)
        .attribute("session_affinity", STRING)
        .attribute("type", STRING)
        .block("port", port);

    MappingSpec::new("kubernetes_service_v1")
        .block("metadata", metadata(true))
        .block("spec", spec)
}
