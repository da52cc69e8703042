//! Router descriptor: the attribute bag for one router resource.
//!
//! A descriptor holds both the desired-state inputs supplied by the caller
//! (provider, region, interfaces, instance type, ...) and the observed
//! outputs written back by the reconciliation engine (BGP ASN, deployment
//! status, tracking identifier). It is exclusively owned by the single
//! in-flight workflow, so no interior locking is needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cloud providers accepted for a router descriptor.
const SUPPORTED_CLOUD_PROVIDERS: [&str; 3] = ["aws", "azure", "gcp"];

/// One network interface attached to the router.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RouterInterface {
    /// Interface name (for example `eth0`).
    pub name: String,
    /// Provider-assigned interface identifier.
    pub id: String,
    /// Private IP address bound to the interface.
    pub private_ip: String,
    /// Subnet the interface is attached to.
    pub subnet_id: String,
    /// Interface role (for example `internal` or `external`).
    pub kind: String,
}

/// Desired and observed state for one CloudEOS router.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RouterDescriptor {
    /// Caller-supplied resource identifier; input to identifier derivation.
    pub tf_id: String,
    /// Cloud provider hosting the router (`aws`, `azure`, or `gcp`).
    pub cloud_provider: String,
    /// Region the router is deployed in.
    pub region: String,
    /// Commercial instance type backing the router VM.
    pub instance_type: String,
    /// Network interfaces attached to the router; at least one is required.
    pub interfaces: Vec<RouterInterface>,
    /// Tags applied to the backing resource.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// VM instance identifier, once known.
    #[serde(default)]
    pub instance_id: Option<String>,
    /// VPC hosting the router (AWS).
    #[serde(default)]
    pub vpc_id: Option<String>,
    /// Resource group name (Azure).
    #[serde(default)]
    pub rg_name: Option<String>,
    /// Resource group location (Azure).
    #[serde(default)]
    pub rg_location: Option<String>,
    /// Availability zone of the backing VM.
    #[serde(default)]
    pub availability_zone: Option<String>,
    /// Public IP address, once assigned.
    #[serde(default)]
    pub public_ip: Option<String>,
    /// Fleet container the device is registered under.
    #[serde(default)]
    pub cv_container: Option<String>,
    /// Name of the high-availability peer, when deployed as a pair.
    #[serde(default)]
    pub ha_name: Option<String>,
    /// Cloud network private segment the router serves.
    #[serde(default)]
    pub cnps: Option<String>,
    /// Whether the router acts as a BGP route reflector.
    #[serde(default)]
    pub is_rr: bool,
    /// Route tables for private subnets.
    #[serde(default)]
    pub private_rt_table_ids: Vec<String>,
    /// Route tables for internal traffic.
    #[serde(default)]
    pub internal_rt_table_ids: Vec<String>,
    /// Route tables for public subnets.
    #[serde(default)]
    pub public_rt_table_ids: Vec<String>,
    /// BGP autonomous system number reported by the control plane.
    ///
    /// Empty until the router has converged; its presence is the sole
    /// convergence signal for the create workflow.
    #[serde(default)]
    pub router_bgp_asn: String,
    /// Deployment status reported by the control plane; informational.
    #[serde(default)]
    pub deployment_status: String,
    /// Derived tracking identifier; empty while the resource is untracked.
    #[serde(default)]
    pub status_id: String,
}

impl RouterDescriptor {
    /// Starts a builder for a [`RouterDescriptor`].
    #[must_use]
    pub fn builder() -> RouterDescriptorBuilder {
        RouterDescriptorBuilder::new()
    }

    /// Validates the desired-state fields, returning a descriptive error
    /// when a required field is missing or unsupported.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Validation`] when a required field is
    /// empty and [`DescriptorError::UnsupportedCloudProvider`] when the
    /// provider is not one of `aws`, `azure`, or `gcp`.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.tf_id.is_empty() {
            return Err(DescriptorError::Validation("tf_id".to_owned()));
        }
        if self.cloud_provider.is_empty() {
            return Err(DescriptorError::Validation("cloud_provider".to_owned()));
        }
        if !SUPPORTED_CLOUD_PROVIDERS.contains(&self.cloud_provider.as_str()) {
            return Err(DescriptorError::UnsupportedCloudProvider {
                value: self.cloud_provider.clone(),
            });
        }
        if self.region.is_empty() {
            return Err(DescriptorError::Validation("region".to_owned()));
        }
        if self.instance_type.is_empty() {
            return Err(DescriptorError::Validation("instance_type".to_owned()));
        }
        if self.interfaces.is_empty() {
            return Err(DescriptorError::Validation("interfaces".to_owned()));
        }
        Ok(())
    }

    /// Returns `true` once the control plane has reported a BGP ASN.
    #[must_use]
    pub fn has_bgp_asn(&self) -> bool {
        !self.router_bgp_asn.is_empty()
    }

    /// Records the BGP ASN observed from the control plane.
    pub fn set_bgp_asn(&mut self, asn: impl Into<String>) {
        self.router_bgp_asn = asn.into();
    }

    /// Records the deployment status observed from the control plane.
    pub fn set_deployment_status(&mut self, status: impl Into<String>) {
        self.deployment_status = status.into();
    }

    /// Assigns the derived tracking identifier after create convergence.
    pub fn assign_status_id(&mut self, status_id: impl Into<String>) {
        self.status_id = status_id.into();
    }

    /// Clears the tracking identifier after delete convergence.
    pub fn clear_status_id(&mut self) {
        self.status_id.clear();
    }
}

/// Builder for [`RouterDescriptor`] that defers trimming and validation to
/// construction.
#[derive(Clone, Debug, Default)]
pub struct RouterDescriptorBuilder {
    tf_id: String,
    cloud_provider: String,
    region: String,
    instance_type: String,
    interfaces: Vec<RouterInterface>,
    tags: BTreeMap<String, String>,
    vpc_id: Option<String>,
    rg_name: Option<String>,
    rg_location: Option<String>,
    availability_zone: Option<String>,
    cv_container: Option<String>,
    ha_name: Option<String>,
    cnps: Option<String>,
    is_rr: bool,
}

impl RouterDescriptorBuilder {
    /// Creates an empty builder; required fields must be populated before
    /// build.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the caller-supplied resource identifier.
    #[must_use]
    pub fn tf_id(mut self, value: impl Into<String>) -> Self {
        self.tf_id = value.into();
        self
    }

    /// Sets the cloud provider.
    #[must_use]
    pub fn cloud_provider(mut self, value: impl Into<String>) -> Self {
        self.cloud_provider = value.into();
        self
    }

    /// Sets the deployment region.
    #[must_use]
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.region = value.into();
        self
    }

    /// Sets the backing instance type.
    #[must_use]
    pub fn instance_type(mut self, value: impl Into<String>) -> Self {
        self.instance_type = value.into();
        self
    }

    /// Appends a network interface.
    #[must_use]
    pub fn interface(mut self, interface: RouterInterface) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Adds a tag to the backing resource.
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Sets the hosting VPC (AWS).
    #[must_use]
    pub fn vpc_id(mut self, value: Option<String>) -> Self {
        self.vpc_id = value;
        self
    }

    /// Sets the resource group name and location (Azure).
    #[must_use]
    pub fn resource_group(mut self, name: Option<String>, location: Option<String>) -> Self {
        self.rg_name = name;
        self.rg_location = location;
        self
    }

    /// Sets the availability zone.
    #[must_use]
    pub fn availability_zone(mut self, value: Option<String>) -> Self {
        self.availability_zone = value;
        self
    }

    /// Sets the fleet container the device registers under.
    #[must_use]
    pub fn cv_container(mut self, value: Option<String>) -> Self {
        self.cv_container = value;
        self
    }

    /// Sets the high-availability peer name.
    #[must_use]
    pub fn ha_name(mut self, value: Option<String>) -> Self {
        self.ha_name = value;
        self
    }

    /// Sets the cloud network private segment.
    #[must_use]
    pub fn cnps(mut self, value: Option<String>) -> Self {
        self.cnps = value;
        self
    }

    /// Marks the router as a BGP route reflector.
    #[must_use]
    pub const fn route_reflector(mut self, value: bool) -> Self {
        self.is_rr = value;
        self
    }

    /// Builds and validates the [`RouterDescriptor`], trimming string
    /// inputs.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when a required field is empty or the
    /// cloud provider is unsupported.
    pub fn build(self) -> Result<RouterDescriptor, DescriptorError> {
        let descriptor = RouterDescriptor {
            tf_id: self.tf_id.trim().to_owned(),
            cloud_provider: self.cloud_provider.trim().to_owned(),
            region: self.region.trim().to_owned(),
            instance_type: self.instance_type.trim().to_owned(),
            interfaces: self.interfaces,
            tags: self.tags,
            instance_id: None,
            vpc_id: self.vpc_id.map(|value| value.trim().to_owned()),
            rg_name: self.rg_name.map(|value| value.trim().to_owned()),
            rg_location: self.rg_location.map(|value| value.trim().to_owned()),
            availability_zone: self.availability_zone.map(|value| value.trim().to_owned()),
            public_ip: None,
            cv_container: self.cv_container.map(|value| value.trim().to_owned()),
            ha_name: self.ha_name.map(|value| value.trim().to_owned()),
            cnps: self.cnps.map(|value| value.trim().to_owned()),
            is_rr: self.is_rr,
            private_rt_table_ids: Vec::new(),
            internal_rt_table_ids: Vec::new(),
            public_rt_table_ids: Vec::new(),
            router_bgp_asn: String::new(),
            deployment_status: String::new(),
            status_id: String::new(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

/// Errors raised while building or validating a descriptor.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DescriptorError {
    /// Raised when a required field is missing or empty.
    #[error("missing or empty field: {0}")]
    Validation(String),
    /// Raised when the cloud provider is not one of the supported values.
    #[error("unsupported cloud provider '{value}' (expected aws, azure, or gcp)")]
    UnsupportedCloudProvider {
        /// The rejected provider value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DescriptorError, RouterDescriptor, RouterInterface};

    fn interface() -> RouterInterface {
        RouterInterface {
            name: "eth0".to_owned(),
            id: "eni-1".to_owned(),
            private_ip: "10.0.0.4".to_owned(),
            subnet_id: "subnet-1".to_owned(),
            kind: "internal".to_owned(),
        }
    }

    fn valid() -> RouterDescriptor {
        RouterDescriptor::builder()
            .tf_id("router-abc123")
            .cloud_provider("aws")
            .region("us-west-2")
            .instance_type("c5.xlarge")
            .interface(interface())
            .build()
            .unwrap_or_else(|err| panic!("descriptor should build: {err}"))
    }

    #[rstest]
    fn builder_trims_and_validates() {
        let descriptor = RouterDescriptor::builder()
            .tf_id("  router-abc123  ")
            .cloud_provider("aws")
            .region(" us-west-2 ")
            .instance_type("c5.xlarge")
            .interface(interface())
            .tag("Name", "edge-1")
            .build()
            .unwrap_or_else(|err| panic!("descriptor should build: {err}"));

        assert_eq!(descriptor.tf_id, "router-abc123");
        assert_eq!(descriptor.region, "us-west-2");
        assert_eq!(descriptor.tags.get("Name").map(String::as_str), Some("edge-1"));
        assert!(descriptor.status_id.is_empty());
        assert!(!descriptor.has_bgp_asn());
    }

    #[rstest]
    #[case("tf_id", "", "aws", "us-west-2", "c5.xlarge")]
    #[case("cloud_provider", "router-1", "", "us-west-2", "c5.xlarge")]
    #[case("region", "router-1", "aws", " ", "c5.xlarge")]
    #[case("instance_type", "router-1", "aws", "us-west-2", "")]
    fn builder_rejects_blank_required_fields(
        #[case] expected_field: &str,
        #[case] tf_id: &str,
        #[case] cloud_provider: &str,
        #[case] region: &str,
        #[case] instance_type: &str,
    ) {
        let err = RouterDescriptor::builder()
            .tf_id(tf_id)
            .cloud_provider(cloud_provider)
            .region(region)
            .instance_type(instance_type)
            .interface(interface())
            .build()
            .expect_err("expected validation failure");
        assert_eq!(err, DescriptorError::Validation(expected_field.to_owned()));
    }

    #[rstest]
    fn builder_rejects_unknown_cloud_provider() {
        let err = RouterDescriptor::builder()
            .tf_id("router-1")
            .cloud_provider("metal")
            .region("dc-1")
            .instance_type("c5.xlarge")
            .interface(interface())
            .build()
            .expect_err("expected provider rejection");
        assert!(matches!(
            err,
            DescriptorError::UnsupportedCloudProvider { ref value } if value == "metal"
        ));
    }

    #[rstest]
    fn builder_requires_an_interface() {
        let err = RouterDescriptor::builder()
            .tf_id("router-1")
            .cloud_provider("gcp")
            .region("europe-west1")
            .instance_type("n2-standard-4")
            .build()
            .expect_err("expected validation failure");
        assert_eq!(err, DescriptorError::Validation("interfaces".to_owned()));
    }

    #[rstest]
    fn observed_fields_round_trip() {
        let mut descriptor = valid();
        descriptor.set_bgp_asn("65001");
        descriptor.set_deployment_status("deployed");
        descriptor.assign_status_id("cloudeos-router-status-abc123");

        assert!(descriptor.has_bgp_asn());
        assert_eq!(descriptor.deployment_status, "deployed");

        descriptor.clear_status_id();
        assert!(descriptor.status_id.is_empty());
    }

    #[rstest]
    fn serde_defaults_fill_observed_fields() {
        let parsed: RouterDescriptor = serde_json::from_str(
            r#"{
                "tf_id": "router-abc123",
                "cloud_provider": "aws",
                "region": "us-west-2",
                "instance_type": "c5.xlarge",
                "interfaces": [{
                    "name": "eth0",
                    "id": "eni-1",
                    "private_ip": "10.0.0.4",
                    "subnet_id": "subnet-1",
                    "kind": "internal"
                }]
            }"#,
        )
        .unwrap_or_else(|err| panic!("descriptor should parse: {err}"));

        assert!(parsed.router_bgp_asn.is_empty());
        assert!(parsed.status_id.is_empty());
        assert!(parsed.validate().is_ok());
    }
}
