//! Registrar pricing and affiliate link aggregation.
//!
//! Each supported registrar has its own URL shape, tracking parameter, and
//! per-extension price table. Affiliate identifiers come from configuration
//! and may be absent, in which case links omit the tracking parameter but
//! remain valid search URLs.
//!
//! Everything in this module is a pure function of the domain name and the
//! registrar table built at startup: the same inputs always produce
//! byte-identical output.

use crate::catalog::ExtensionCatalog;
use crate::types::{round_cents, QuoteSet, RegistrarQuote};
use std::collections::BTreeMap;
use url::Url;

/// Affiliate/tracking identifiers, one per registrar, all optional.
#[derive(Debug, Clone, Default)]
pub struct AffiliateIds {
    pub godaddy: Option<String>,
    /// GoDaddy product-line id, only meaningful alongside `godaddy`
    pub godaddy_plid: Option<String>,
    pub namecheap: Option<String>,
    pub hover: Option<String>,
    pub porkbun: Option<String>,
    pub squarespace: Option<String>,
}

/// One registrar's static configuration.
#[derive(Debug, Clone)]
pub struct Registrar {
    pub name: &'static str,
    pub logo: &'static str,
    affiliate_id: Option<String>,
    plid: Option<String>,
    pricing: &'static [(&'static str, f64)],
}

impl Registrar {
    /// List price for an extension, if this registrar sells it.
    pub fn price_for(&self, extension: &str) -> Option<f64> {
        self.pricing
            .iter()
            .find(|(suffix, _)| *suffix == extension)
            .map(|(_, price)| *price)
    }

    /// Build the search/checkout URL for a domain, appending affiliate
    /// tracking when an identifier is configured. Each registrar has its
    /// own URL shape and parameter names.
    pub fn purchase_link(&self, domain: &str) -> String {
        let url = match self.name {
            "GoDaddy" => {
                let mut url = Url::parse("https://www.godaddy.com/domainsearch/find")
                    .expect("static registrar URL");
                url.query_pairs_mut()
                    .append_pair("checkAvail", "1")
                    .append_pair("domainToCheck", domain);
                if let Some(id) = &self.affiliate_id {
                    url.query_pairs_mut().append_pair("isc", id);
                    if let Some(plid) = &self.plid {
                        url.query_pairs_mut().append_pair("plid", plid);
                    }
                }
                url
            }
            "Namecheap" => {
                let mut url =
                    Url::parse("https://www.namecheap.com/domains/registration/results/")
                        .expect("static registrar URL");
                url.query_pairs_mut().append_pair("domain", domain);
                if let Some(id) = &self.affiliate_id {
                    url.query_pairs_mut().append_pair("afftrack", id);
                }
                url
            }
            "Hover" => {
                let mut url = Url::parse("https://hover.com/domains/results")
                    .expect("static registrar URL");
                url.query_pairs_mut()
                    .append_pair("utf8", "\u{2713}")
                    .append_pair("domain-name", domain);
                if let Some(id) = &self.affiliate_id {
                    url.query_pairs_mut()
                        .append_pair("utm_source", id)
                        .append_pair("utm_medium", "affiliate")
                        .append_pair("utm_campaign", "domain-search");
                }
                url
            }
            "Porkbun" => {
                let mut url = Url::parse("https://porkbun.com/checkout/search")
                    .expect("static registrar URL");
                url.query_pairs_mut().append_pair("q", domain);
                if let Some(id) = &self.affiliate_id {
                    url.query_pairs_mut().append_pair("coupon", id);
                }
                url
            }
            "Squarespace" => {
                let mut url = Url::parse("https://domains.squarespace.com/search")
                    .expect("static registrar URL");
                url.query_pairs_mut().append_pair("query", domain);
                if let Some(id) = &self.affiliate_id {
                    url.query_pairs_mut().append_pair("channel", id);
                }
                url
            }
            _ => {
                let mut url =
                    Url::parse("https://www.godaddy.com/domains/domain-name-search")
                        .expect("static registrar URL");
                url.query_pairs_mut().append_pair("domain", domain);
                url
            }
        };

        url.to_string()
    }

    fn quote(&self, domain: &str, price: f64) -> RegistrarQuote {
        RegistrarQuote {
            registrar: self.name.to_string(),
            price: round_cents(price),
            affiliate_link: self.purchase_link(domain),
            logo: self.logo.to_string(),
            has_affiliate: self.affiliate_id.is_some(),
        }
    }
}

const GODADDY_PRICING: &[(&str, f64)] = &[
    (".com", 17.99),
    (".net", 19.99),
    (".org", 19.99),
    (".io", 59.99),
    (".co", 32.99),
    (".tech", 52.99),
    (".app", 19.99),
    (".dev", 17.99),
    (".ai", 89.99),
    (".xyz", 12.99),
    (".me", 19.99),
    (".info", 19.99),
];

const NAMECHEAP_PRICING: &[(&str, f64)] = &[
    (".com", 13.98),
    (".net", 15.98),
    (".org", 14.98),
    (".io", 48.88),
    (".co", 28.88),
    (".tech", 48.88),
    (".app", 18.88),
    (".dev", 15.88),
    (".ai", 85.88),
    (".xyz", 8.88),
    (".me", 18.88),
    (".info", 18.88),
];

const HOVER_PRICING: &[(&str, f64)] = &[
    (".com", 15.99),
    (".net", 17.99),
    (".org", 16.99),
    (".io", 79.00),
    (".co", 39.99),
    (".tech", 59.99),
    (".app", 19.99),
    (".dev", 17.99),
    (".ai", 99.99),
    (".xyz", 14.99),
    (".me", 19.99),
    (".info", 19.99),
];

const PORKBUN_PRICING: &[(&str, f64)] = &[
    (".com", 10.73),
    (".net", 11.98),
    (".org", 11.98),
    (".io", 56.00),
    (".co", 29.47),
    (".tech", 49.47),
    (".app", 16.47),
    (".dev", 14.47),
    (".ai", 81.47),
    (".xyz", 3.47),
    (".me", 16.47),
    (".info", 16.47),
];

const SQUARESPACE_PRICING: &[(&str, f64)] = &[
    (".com", 20.00),
    (".net", 20.00),
    (".org", 20.00),
    (".io", 70.00),
    (".co", 35.00),
    (".tech", 60.00),
    (".app", 25.00),
    (".dev", 22.00),
    (".ai", 95.00),
    (".xyz", 15.00),
    (".me", 25.00),
    (".info", 25.00),
];

/// The configured registrar set, built once at startup.
#[derive(Debug, Clone)]
pub struct RegistrarTable {
    registrars: Vec<Registrar>,
}

impl RegistrarTable {
    /// Build the registrar table, attaching whatever affiliate identifiers
    /// configuration provided.
    pub fn with_affiliates(ids: AffiliateIds) -> Self {
        let registrars = vec![
            Registrar {
                name: "GoDaddy",
                logo: "godaddy",
                affiliate_id: ids.godaddy,
                plid: ids.godaddy_plid,
                pricing: GODADDY_PRICING,
            },
            Registrar {
                name: "Namecheap",
                logo: "namecheap",
                affiliate_id: ids.namecheap,
                plid: None,
                pricing: NAMECHEAP_PRICING,
            },
            Registrar {
                name: "Hover",
                logo: "hover",
                affiliate_id: ids.hover,
                plid: None,
                pricing: HOVER_PRICING,
            },
            Registrar {
                name: "Porkbun",
                logo: "porkbun",
                affiliate_id: ids.porkbun,
                plid: None,
                pricing: PORKBUN_PRICING,
            },
            Registrar {
                name: "Squarespace",
                logo: "squarespace",
                affiliate_id: ids.squarespace,
                plid: None,
                pricing: SQUARESPACE_PRICING,
            },
        ];

        Self { registrars }
    }

    /// The configured registrars.
    pub fn registrars(&self) -> &[Registrar] {
        &self.registrars
    }

    /// Compute the per-registrar quote table for a domain and pick the best
    /// (minimum-price) quote.
    ///
    /// Registrars without a price entry for the extension are omitted. If
    /// no registrar lists the extension at all, the result falls back to a
    /// single synthesized quote from the first configured registrar at the
    /// catalog base price.
    pub fn price_quotes(
        &self,
        domain: &str,
        extension: &str,
        catalog: &ExtensionCatalog,
    ) -> QuoteSet {
        let mut quotes: BTreeMap<String, RegistrarQuote> = BTreeMap::new();

        for registrar in &self.registrars {
            if let Some(price) = registrar.price_for(extension) {
                quotes.insert(registrar.name.to_string(), registrar.quote(domain, price));
            }
        }

        let best = quotes
            .values()
            .min_by(|a, b| {
                a.price
                    .total_cmp(&b.price)
                    .then_with(|| a.registrar.cmp(&b.registrar))
            })
            .cloned()
            .unwrap_or_else(|| {
                // Extension priced by no registrar: quote the default
                // registrar at the catalog base price.
                self.registrars[0].quote(domain, catalog.base_price(extension))
            });

        QuoteSet { quotes, best }
    }
}

impl Default for RegistrarTable {
    fn default() -> Self {
        Self::with_affiliates(AffiliateIds::default())
    }
}
