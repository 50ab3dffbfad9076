//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PageArgs};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::pagination::{CursorOptions, ListOperation, Pager, PagerItem};
use crate::service::{
    CatalogManagementService, GetCatalogAccountAuditsOptions, GetConsumptionOfferingsOptions,
    GetNamespacesOptions, GetObjectAccessListOptions, GetOfferingAccessListOptions,
    GetShareApprovalListAsSourceOptions, GetShareApprovalListOptions,
    ListCatalogAuditsOptions, ListEnterpriseAuditsOptions, ListObjectAuditsOptions,
    ListObjectsOptions, ListOfferingAuditsOptions, ListOfferingsOptions, SearchObjectsOptions,
};
use crate::types::CursorPolicy;
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let service = self.build_service()?;

        match &self.cli.command {
            Commands::Catalogs => {
                let result = service.list_catalogs().await?;
                self.emit(&result.resources)
            }
            Commands::Offerings {
                catalog,
                name,
                include_hidden,
                page,
            } => {
                let include_hidden = include_hidden.then_some(true);
                match catalog {
                    Some(catalog) => {
                        let options = ListOfferingsOptions {
                            limit: page.limit,
                            name: name.clone(),
                            include_hidden,
                            ..ListOfferingsOptions::new(catalog.as_str())
                        };
                        self.emit(&drain(service.offerings_pager(&options)?, page).await?)
                    }
                    None => {
                        let options = GetConsumptionOfferingsOptions {
                            limit: page.limit,
                            include_hidden,
                            ..Default::default()
                        };
                        self.emit(&drain(service.consumption_offerings_pager(&options)?, page).await?)
                    }
                }
            }
            Commands::Objects {
                catalog,
                query,
                kind,
                page,
            } => match (catalog, query) {
                (Some(catalog), _) => {
                    let options = ListObjectsOptions {
                        limit: page.limit,
                        ..ListObjectsOptions::new(catalog.as_str())
                    };
                    self.emit(&drain(service.objects_pager(&options)?, page).await?)
                }
                (None, query) => {
                    let options = SearchObjectsOptions {
                        kind: kind.clone(),
                        limit: page.limit,
                        ..SearchObjectsOptions::new(query.clone().unwrap_or_default())
                    };
                    self.emit(&drain(service.search_objects_pager(&options)?, page).await?)
                }
            },
            Commands::Namespaces { page } => {
                let options = GetNamespacesOptions {
                    limit: page.limit,
                    ..Default::default()
                };
                self.emit(&drain(service.namespaces_pager(&options)?, page).await?)
            }
            Commands::Audits {
                catalog,
                offering,
                object,
                enterprise,
                lookupnames,
                page,
            } => {
                let lookupnames = lookupnames.then_some(true);
                let audits = match (catalog, offering, object, enterprise) {
                    (Some(catalog), Some(offering), _, _) => {
                        let options = ListOfferingAuditsOptions {
                            limit: page.limit,
                            lookupnames,
                            ..ListOfferingAuditsOptions::new(catalog.as_str(), offering.as_str())
                        };
                        drain(service.offering_audits_pager(&options)?, page).await?
                    }
                    (Some(catalog), None, Some(object), _) => {
                        let options = ListObjectAuditsOptions {
                            limit: page.limit,
                            lookupnames,
                            ..ListObjectAuditsOptions::new(catalog.as_str(), object.as_str())
                        };
                        drain(service.object_audits_pager(&options)?, page).await?
                    }
                    (Some(catalog), None, None, _) => {
                        let options = ListCatalogAuditsOptions {
                            limit: page.limit,
                            lookupnames,
                            ..ListCatalogAuditsOptions::new(catalog.as_str())
                        };
                        drain(service.catalog_audits_pager(&options)?, page).await?
                    }
                    (None, _, _, Some(enterprise)) => {
                        let options = ListEnterpriseAuditsOptions {
                            limit: page.limit,
                            lookupnames,
                            ..ListEnterpriseAuditsOptions::new(enterprise.as_str())
                        };
                        drain(service.enterprise_audits_pager(&options)?, page).await?
                    }
                    (None, _, _, None) => {
                        let options = GetCatalogAccountAuditsOptions {
                            limit: page.limit,
                            lookupnames,
                            ..Default::default()
                        };
                        drain(service.catalog_account_audits_pager(&options)?, page).await?
                    }
                };
                self.emit(&audits)
            }
            Commands::Access {
                catalog,
                object,
                offering,
                page,
            } => match (object, offering) {
                (Some(object), _) => {
                    let options = GetObjectAccessListOptions {
                        limit: page.limit,
                        ..GetObjectAccessListOptions::new(catalog.as_str(), object.as_str())
                    };
                    self.emit(&drain(service.object_access_pager(&options)?, page).await?)
                }
                (None, offering) => {
                    let options = GetOfferingAccessListOptions {
                        limit: page.limit,
                        ..GetOfferingAccessListOptions::new(
                            catalog.as_str(),
                            offering.clone().unwrap_or_default(),
                        )
                    };
                    self.emit(&drain(service.offering_access_pager(&options)?, page).await?)
                }
            },
            Commands::ShareApprovals {
                object_type,
                as_source,
                page,
            } => {
                let approvals = if *as_source {
                    let options = GetShareApprovalListAsSourceOptions {
                        limit: page.limit,
                        ..GetShareApprovalListAsSourceOptions::new(object_type.as_str())
                    };
                    drain(service.share_approvals_as_source_pager(&options)?, page).await?
                } else {
                    let options = GetShareApprovalListOptions {
                        limit: page.limit,
                        ..GetShareApprovalListOptions::new(object_type.as_str())
                    };
                    drain(service.share_approvals_pager(&options)?, page).await?
                };
                self.emit(&approvals)
            }
        }
    }

    /// Build the service client from the config file or the environment
    fn build_service(&self) -> Result<CatalogManagementService> {
        let mut config = match &self.cli.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::from_env()?,
        };
        if let Some(url) = &self.cli.service_url {
            config.service_url.clone_from(url);
        }
        CatalogManagementService::new(&config)
    }

    /// Write resources to stdout
    fn emit<T: Serialize>(&self, items: &[T]) -> Result<()> {
        let rendered = render(self.cli.format, items)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        info!(count = items.len(), "Listed resources");
        Ok(())
    }
}

/// Fetch the first page, or every page when `--all` is given
async fn drain<L, O>(pager: Pager<'_, L, O>, args: &PageArgs) -> Result<Vec<PagerItem<L, O>>>
where
    L: ListOperation<O>,
    O: CursorOptions,
{
    let mut pager = if args.strict_cursor {
        pager.with_cursor_policy(CursorPolicy::Strict)
    } else {
        pager
    };

    if args.all {
        pager.get_all().await
    } else {
        pager.get_next().await
    }
}

/// Render resources in the given format
pub fn render<T: Serialize>(format: OutputFormat, items: &[T]) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            for item in items {
                out.push_str(&serde_json::to_string(item)?);
                out.push('\n');
            }
        }
        OutputFormat::Pretty => {
            out.push_str(&serde_json::to_string_pretty(items)?);
            out.push('\n');
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_render_json_lines() {
        let items = vec![json!({"id": "a"}), json!({"id": "b"})];
        let out = render(OutputFormat::Json, &items).unwrap();
        assert_eq!(out, "{\"id\":\"a\"}\n{\"id\":\"b\"}\n");
    }

    #[test]
    fn test_render_pretty() {
        let items = vec![json!({"id": "a"})];
        let out = render(OutputFormat::Pretty, &items).unwrap();
        assert!(out.starts_with("[\n"));
        assert!(out.contains("\"id\": \"a\""));
    }

    #[test]
    fn test_render_empty() {
        let items: Vec<serde_json::Value> = Vec::new();
        assert_eq!(render(OutputFormat::Json, &items).unwrap(), "");
        assert_eq!(render(OutputFormat::Pretty, &items).unwrap(), "[]\n");
    }

    #[tokio::test]
    async fn test_run_namespaces_all_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/namespaces"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": ["ns-a"],
                "next": "/api/namespaces?offset=1"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/namespaces"))
            .and(query_param("offset", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": ["ns-b"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "service_url: {}/api", server.uri()).unwrap();
        writeln!(config, "rate_limit: null").unwrap();

        let config_path = config.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "catalog-mgmt",
            "--config",
            config_path.as_str(),
            "namespaces",
            "--all",
        ])
        .unwrap();

        Runner::new(cli).run().await.unwrap();
    }

    #[tokio::test]
    async fn test_run_fails_on_bad_config() {
        let cli = Cli::try_parse_from([
            "catalog-mgmt",
            "--config",
            "/definitely/not/here.yaml",
            "catalogs",
        ])
        .unwrap();

        assert!(Runner::new(cli).run().await.is_err());
    }
}
