//! Wire payloads exchanged with the fleet management service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::descriptor::{RouterDescriptor, RouterInterface};

/// Router configuration sent on apply.
#[derive(Debug, Serialize)]
pub(crate) struct RouterPayload<'a> {
    pub(crate) tf_id: &'a str,
    pub(crate) cloud_provider: &'a str,
    pub(crate) region: &'a str,
    pub(crate) instance_type: &'a str,
    pub(crate) interfaces: &'a [RouterInterface],
    pub(crate) tags: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) vpc_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rg_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rg_location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) availability_zone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cv_container: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ha_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cnps: Option<&'a str>,
    pub(crate) is_rr: bool,
}

impl<'a> From<&'a RouterDescriptor> for RouterPayload<'a> {
    fn from(descriptor: &'a RouterDescriptor) -> Self {
        Self {
            tf_id: &descriptor.tf_id,
            cloud_provider: &descriptor.cloud_provider,
            region: &descriptor.region,
            instance_type: &descriptor.instance_type,
            interfaces: &descriptor.interfaces,
            tags: &descriptor.tags,
            vpc_id: descriptor.vpc_id.as_deref(),
            rg_name: descriptor.rg_name.as_deref(),
            rg_location: descriptor.rg_location.as_deref(),
            availability_zone: descriptor.availability_zone.as_deref(),
            cv_container: descriptor.cv_container.as_deref(),
            ha_name: descriptor.ha_name.as_deref(),
            cnps: descriptor.cnps.as_deref(),
            is_rr: descriptor.is_rr,
        }
    }
}

/// Observed router state returned by the status endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct RouterStatusResponse {
    #[serde(default)]
    pub(crate) bgp_asn: String,
    #[serde(default)]
    pub(crate) deployment_status: String,
    #[serde(default)]
    pub(crate) instance_id: Option<String>,
    #[serde(default)]
    pub(crate) public_ip: Option<String>,
}

/// Deletion progress returned by the deletion endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DeletionStatusResponse {
    pub(crate) deleted: bool,
}
