//! Landing page → [`SiteSummary`] extraction
//!
//! Each region of the page is found through a structural anchor (an id, a
//! class or a data attribute) and read relative to it. A missing anchor never
//! fails the extraction: the field is left empty and the anchor name is
//! reported in [`Extraction::missing_anchors`].

use chrono::{DateTime, SecondsFormat, Utc};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use super::summary::{
    AiSolution, Contact, Hero, Link, Metric, OpenGraph, ProcessStep, SectionOutline, Service,
    SiteInfo, SiteSummary, SourceInfo, DEFAULT_BRAND_NAME, DEFAULT_LANGUAGE, DEFAULT_LOGO,
};
use super::text::{element_attr, element_text};

/// Result of one extraction pass
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The summary document
    pub summary: SiteSummary,
    /// Anchors that were not present in the page, in lookup order
    pub missing_anchors: Vec<&'static str>,
}

/// Maps landing page markup to a [`SiteSummary`]
pub struct SiteExtractor;

impl SiteExtractor {
    /// Extract a summary stamped with the current time
    pub fn extract(html: &str) -> Extraction {
        Self::extract_at(html, Utc::now())
    }

    /// Extract a summary stamped with `generated_at`
    #[instrument(skip(html), fields(html_len = html.len()))]
    pub fn extract_at(html: &str, generated_at: DateTime<Utc>) -> Extraction {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let mut anchors = Anchors::default();

        let site = site_info(root, &mut anchors);
        let open_graph = OpenGraph {
            title: anchors.text("og:title", meta_property(root, "og:title")),
            description: anchors.text("og:description", meta_property(root, "og:description")),
            og_type: anchors.text("og:type", meta_property(root, "og:type")),
        };
        let navigation = anchors.list("#nav-links", links_in(root, "#nav-links"));
        let hero = hero(root, &mut anchors);
        let sections = anchors.list("main", sections(root));
        let services = anchors.list("article.service[data-service]", services(root));
        let ai_solutions = anchors.list("#ai", ai_solutions(root));
        let process = anchors.list("#proceso ol.steps", process_steps(root));
        let contact = contact(root, &mut anchors);
        let footer_links = anchors.list(
            "footer .footer__links",
            links_in(root, "footer .footer__links"),
        );

        if !anchors.missing.is_empty() {
            debug!(missing = ?anchors.missing, "anchors not found in page");
        }
        debug!(
            navigation = navigation.len(),
            services = services.len(),
            ai_solutions = ai_solutions.len(),
            process = process.len(),
            "extracted site summary"
        );

        Extraction {
            summary: SiteSummary {
                ok: true,
                generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                site,
                open_graph,
                navigation,
                hero,
                sections,
                services,
                ai_solutions,
                process,
                contact,
                footer_links,
                source: SourceInfo::default(),
            },
            missing_anchors: anchors.missing,
        }
    }
}

/// Records which anchors were absent while unwrapping field values
#[derive(Default)]
struct Anchors {
    missing: Vec<&'static str>,
}

impl Anchors {
    fn text(&mut self, anchor: &'static str, value: Option<String>) -> String {
        value.unwrap_or_else(|| {
            self.missing.push(anchor);
            String::new()
        })
    }

    fn list<T>(&mut self, anchor: &'static str, value: Option<Vec<T>>) -> Vec<T> {
        value.unwrap_or_else(|| {
            self.missing.push(anchor);
            Vec::new()
        })
    }
}

// ============================================================================
// Selector helpers
// ============================================================================

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            debug!(css, error = ?e, "invalid selector");
            None
        }
    }
}

fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Some(sel) = selector(css) else {
        return Vec::new();
    };
    let found: Vec<_> = scope.select(&sel).collect();
    found
}

fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    let found = scope.select(&sel).next();
    found
}

fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(scope, css).map(|el| element_text(&el))
}

fn all_text(scope: ElementRef<'_>, css: &str) -> Vec<String> {
    select_all(scope, css).iter().map(element_text).collect()
}

fn meta_property(root: ElementRef<'_>, property: &str) -> Option<String> {
    select_all(root, "meta[property]")
        .into_iter()
        .find(|meta| meta.value().attr("property") == Some(property))
        .map(|meta| element_attr(&meta, "content").unwrap_or_default())
}

/// `<meta name=..>` lookup, comparing the name case-insensitively
fn meta_name(root: ElementRef<'_>, name: &str) -> Option<String> {
    select_all(root, "meta[name]")
        .into_iter()
        .find(|meta| {
            meta.value()
                .attr("name")
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .map(|meta| element_attr(&meta, "content").unwrap_or_default())
}

fn links_in(root: ElementRef<'_>, container: &str) -> Option<Vec<Link>> {
    let containers = select_all(root, container);
    if containers.is_empty() {
        return None;
    }
    let links = containers
        .into_iter()
        .flat_map(|c| select_all(c, "a"))
        .map(|a| Link {
            label: element_text(&a),
            href: element_attr(&a, "href").unwrap_or_default(),
        })
        .collect();
    Some(links)
}

// ============================================================================
// Regions
// ============================================================================

fn site_info(root: ElementRef<'_>, anchors: &mut Anchors) -> SiteInfo {
    let title = anchors.text("title", first_text(root, "title"));
    let description = anchors.text("meta[name=description]", meta_name(root, "description"));

    let name = anchors.text(".brand__word", first_text(root, ".brand__word"));
    let logo = anchors.text(
        "img.brand__logo",
        select_first(root, "img.brand__logo").and_then(|img| element_attr(&img, "src")),
    );
    let language = root
        .value()
        .attr("lang")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE);

    SiteInfo {
        name: non_empty_or(name, DEFAULT_BRAND_NAME),
        title,
        description,
        logo: non_empty_or(logo, DEFAULT_LOGO),
        language: language.to_string(),
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn hero(root: ElementRef<'_>, anchors: &mut Anchors) -> Hero {
    let kicker = anchors.text(".kicker", first_text(root, ".kicker"));
    let headline = anchors.text("h1", first_text(root, "h1"));
    let lead = anchors.text(".lead", first_text(root, ".lead"));

    let pillars = select_first(root, ".hero__trust").map(|_| all_text(root, ".hero__trust .pill"));
    let pillars = anchors.list(".hero__trust", pillars);

    let metrics = select_first(root, ".metrics").map(|_| {
        select_all(root, ".metrics .metric")
            .into_iter()
            .map(|metric| Metric {
                value: metric_value(metric),
                label: first_text(metric, ".metric__label").unwrap_or_default(),
            })
            .filter(|m| !m.value.is_empty() || !m.label.is_empty())
            .collect()
    });
    let metrics = anchors.list(".metrics", metrics);

    Hero {
        kicker,
        headline,
        lead,
        pillars,
        metrics,
    }
}

/// Counter target from `data-count-to`, else the rendered number
fn metric_value(metric: ElementRef<'_>) -> String {
    match select_first(metric, ".metric__num") {
        Some(num) => match num.value().attr("data-count-to") {
            Some(target) => target.trim().to_string(),
            None => element_text(&num),
        },
        None => String::new(),
    }
}

fn sections(root: ElementRef<'_>) -> Option<Vec<SectionOutline>> {
    select_first(root, "main")?;

    let outline = select_all(root, "main section[id], main header[id]")
        .into_iter()
        .filter_map(|section| {
            let id = section.value().attr("id")?.trim();
            if id.is_empty() {
                return None;
            }
            Some(SectionOutline {
                id: id.to_string(),
                title: first_text(section, "h2").unwrap_or_default(),
                summary: first_text(section, "p").unwrap_or_default(),
            })
        })
        .collect();
    Some(outline)
}

fn services(root: ElementRef<'_>) -> Option<Vec<Service>> {
    let cards = select_all(root, "article.service[data-service]");
    if cards.is_empty() {
        return None;
    }

    let services = cards
        .into_iter()
        .map(|card| Service {
            key: element_attr(&card, "data-service").unwrap_or_default(),
            name: first_text(card, "h3").unwrap_or_default(),
            description: first_text(card, "p").unwrap_or_default(),
            highlights: all_text(card, "ul.serviceList > li"),
        })
        .collect();
    Some(services)
}

fn ai_solutions(root: ElementRef<'_>) -> Option<Vec<AiSolution>> {
    let section = select_first(root, "#ai")?;

    let cards = select_all(section, ".aiCard")
        .into_iter()
        .map(|card| AiSolution {
            name: first_text(card, "h3").unwrap_or_default(),
            description: first_text(card, "p").unwrap_or_default(),
            tags: all_text(card, ".aiTags > span"),
        })
        .collect();
    Some(cards)
}

fn process_steps(root: ElementRef<'_>) -> Option<Vec<ProcessStep>> {
    select_first(root, "#proceso ol.steps")?;

    let steps = select_all(root, "#proceso ol.steps > li")
        .into_iter()
        .map(|li| ProcessStep {
            step: first_text(li, ".step__num").unwrap_or_default(),
            title: first_text(li, "h3").unwrap_or_default(),
            description: first_text(li, "p").unwrap_or_default(),
        })
        .filter(|s| !s.step.is_empty() || !s.title.is_empty())
        .collect();
    Some(steps)
}

fn contact(root: ElementRef<'_>, anchors: &mut Anchors) -> Contact {
    let Some(section) = select_first(root, "#contacto") else {
        anchors.missing.push("#contacto");
        return Contact::default();
    };

    let href = |css: &str| select_first(section, css).and_then(|a| element_attr(&a, "href"));

    Contact {
        email: anchors.text("#contacto a[href^=mailto:]", href(r#"a[href^="mailto:"]"#)),
        tel: anchors.text("#contacto a[href^=tel:]", href(r#"a[href^="tel:"]"#)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PAGE: &str = r##"<!doctype html>
<html lang="es">
<head>
  <title>  SUNTRAM Digital |
     Software a medida </title>
  <meta name="Description" content="Desarrollo web y soluciones de IA" />
  <meta property="og:title" content="SUNTRAM Digital" />
  <meta property="og:description" content="Tecnología para crecer" />
  <meta property="og:type" content="website" />
</head>
<body>
  <header class="nav">
    <a class="brand" href="#inicio">
      <img class="brand__logo" src="assets/logo.png" alt="" />
      <span class="brand__word">SUNTRAM <em>Digital</em></span>
    </a>
    <nav id="nav-links" data-nav-links>
      <a href="#servicios">Servicios</a>
      <a href="#ai">IA</a>
      <a href="#contacto">Contacto</a>
    </nav>
  </header>
  <main>
    <header class="hero" id="inicio">
      <p class="kicker">Estudio de software</p>
      <h1>Construimos   productos
        digitales</h1>
      <p class="lead">Web, apps e <strong>IA</strong> aplicada.</p>
      <div class="hero__trust">
        <div class="pill">Entrega ágil</div>
        <div class="pill">Código propio</div>
      </div>
      <div class="metrics">
        <div class="metric">
          <div class="metric__num" data-count-to="120">0</div>
          <div class="metric__label">Proyectos</div>
        </div>
        <div class="metric">
          <div class="metric__num">15+</div>
          <div class="metric__label">Años</div>
        </div>
        <div class="metric">
          <div class="metric__num"> </div>
          <div class="metric__label"></div>
        </div>
      </div>
    </header>
    <section class="section" id="servicios">
      <h2>Servicios</h2>
      <p>Lo que hacemos.</p>
      <article class="service card" data-service="web">
        <h3>Desarrollo web</h3>
        <p>Sitios rápidos.</p>
        <ul class="serviceList"><li>SEO</li><li> Accesibilidad </li></ul>
      </article>
      <article class="service card" data-service="apps">
        <h3>Apps</h3>
        <p>Móviles.</p>
      </article>
    </section>
    <section class="section section--alt" id="ai">
      <h2>IA</h2>
      <article class="aiCard">
        <h3>Asistentes</h3>
        <p>Chatbots entrenados.</p>
        <div class="aiTags"><span>LLM</span><span>RAG</span></div>
      </article>
    </section>
    <section class="section" id="proceso">
      <h2>Proceso</h2>
      <ol class="steps">
        <li><div class="step__num">01</div><h3>Descubrir</h3><p>Entendemos.</p></li>
        <li><div class="step__num">02</div><h3>Construir</h3><p>Iteramos.</p></li>
        <li></li>
      </ol>
    </section>
    <section class="section section--alt" id="contacto">
      <h2>Contacto</h2>
      <a href="mailto:hola@suntram.digital">hola@suntram.digital</a>
      <a href="tel:+5215555555555">+52 1 55 5555 5555</a>
    </section>
  </main>
  <footer>
    <div class="footer__links">
      <a href="#servicios">Servicios</a>
      <a href="/site">JSON</a>
    </div>
  </footer>
</body>
</html>"##;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_site_metadata() {
        let summary = SiteExtractor::extract_at(PAGE, at()).summary;
        assert_eq!(summary.site.title, "SUNTRAM Digital | Software a medida");
        assert_eq!(summary.site.description, "Desarrollo web y soluciones de IA");
        assert_eq!(summary.site.name, "SUNTRAM Digital");
        assert_eq!(summary.site.logo, "assets/logo.png");
        assert_eq!(summary.site.language, "es");
        assert_eq!(summary.open_graph.title, "SUNTRAM Digital");
        assert_eq!(summary.open_graph.og_type, "website");
        assert_eq!(summary.generated_at, "2026-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_navigation_in_order() {
        let summary = SiteExtractor::extract_at(PAGE, at()).summary;
        let labels: Vec<_> = summary.navigation.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Servicios", "IA", "Contacto"]);
        assert_eq!(summary.navigation[2].href, "#contacto");
    }

    #[test]
    fn test_hero() {
        let hero = SiteExtractor::extract_at(PAGE, at()).summary.hero;
        assert_eq!(hero.kicker, "Estudio de software");
        assert_eq!(hero.headline, "Construimos productos digitales");
        assert_eq!(hero.lead, "Web, apps e IA aplicada.");
        assert_eq!(hero.pillars, vec!["Entrega ágil", "Código propio"]);
        assert_eq!(
            hero.metrics,
            vec![
                Metric {
                    value: "120".into(),
                    label: "Proyectos".into()
                },
                Metric {
                    value: "15+".into(),
                    label: "Años".into()
                },
            ]
        );
    }

    #[test]
    fn test_hero_drops_blank_metric() {
        let hero = SiteExtractor::extract_at(PAGE, at()).summary.hero;
        assert!(hero
            .metrics
            .iter()
            .all(|m| !m.value.is_empty() || !m.label.is_empty()));
        assert_eq!(hero.metrics.len(), 2);
    }

    #[test]
    fn test_inline_markup_keeps_punctuation() {
        let html = r#"<p class="lead">Hacemos <strong>web</strong>, apps.</p>"#;
        let hero = SiteExtractor::extract(html).summary.hero;
        assert_eq!(hero.lead, "Hacemos web, apps.");
    }

    #[test]
    fn test_service_card_with_key() {
        let services = SiteExtractor::extract_at(PAGE, at()).summary.services;
        let web = services.iter().find(|s| s.key == "web").unwrap();
        assert_eq!(web.name, "Desarrollo web");
        assert_eq!(web.description, "Sitios rápidos.");
        assert_eq!(web.highlights, vec!["SEO", "Accesibilidad"]);

        let apps = services.iter().find(|s| s.key == "apps").unwrap();
        assert!(apps.highlights.is_empty());
    }

    #[test]
    fn test_ai_and_process() {
        let summary = SiteExtractor::extract_at(PAGE, at()).summary;
        assert_eq!(summary.ai_solutions.len(), 1);
        assert_eq!(summary.ai_solutions[0].tags, vec!["LLM", "RAG"]);

        // the empty <li> is dropped
        assert_eq!(summary.process.len(), 2);
        assert_eq!(summary.process[1].step, "02");
        assert_eq!(summary.process[1].title, "Construir");
        assert_eq!(summary.process[1].description, "Iteramos.");
    }

    #[test]
    fn test_contact_and_footer() {
        let summary = SiteExtractor::extract_at(PAGE, at()).summary;
        assert_eq!(summary.contact.email, "mailto:hola@suntram.digital");
        assert_eq!(summary.contact.tel, "tel:+5215555555555");
        assert_eq!(summary.footer_links.len(), 2);
        assert_eq!(summary.footer_links[1].href, "/site");
    }

    #[test]
    fn test_sections_outline() {
        let sections = SiteExtractor::extract_at(PAGE, at()).summary.sections;
        let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["inicio", "servicios", "ai", "proceso", "contacto"]);
        assert_eq!(sections[1].title, "Servicios");
        assert_eq!(sections[1].summary, "Lo que hacemos.");
    }

    #[test]
    fn test_complete_page_has_no_missing_anchors() {
        let extraction = SiteExtractor::extract_at(PAGE, at());
        assert!(
            extraction.missing_anchors.is_empty(),
            "unexpected: {:?}",
            extraction.missing_anchors
        );
    }

    #[test]
    fn test_missing_contact_section() {
        let html = PAGE.replace("id=\"contacto\"", "id=\"otro\"");
        let extraction = SiteExtractor::extract_at(&html, at());
        assert_eq!(extraction.summary.contact.email, "");
        assert_eq!(extraction.summary.contact.tel, "");
        assert!(extraction.missing_anchors.contains(&"#contacto"));
    }

    #[test]
    fn test_empty_document_degrades_to_defaults() {
        let extraction = SiteExtractor::extract_at("", at());
        let summary = extraction.summary;

        assert!(summary.ok);
        assert_eq!(summary.site.name, DEFAULT_BRAND_NAME);
        assert_eq!(summary.site.logo, DEFAULT_LOGO);
        assert_eq!(summary.site.language, DEFAULT_LANGUAGE);
        assert_eq!(summary.site.title, "");
        assert!(summary.navigation.is_empty());
        assert!(summary.services.is_empty());
        assert!(summary.hero.metrics.is_empty());
        assert!(extraction.missing_anchors.contains(&"#nav-links"));
        assert!(extraction.missing_anchors.contains(&"title"));
    }

    #[test]
    fn test_present_but_empty_is_not_missing() {
        let html = r#"<html><head><title></title></head><body><nav id="nav-links"></nav></body></html>"#;
        let extraction = SiteExtractor::extract_at(html, at());
        assert_eq!(extraction.summary.site.title, "");
        assert!(extraction.summary.navigation.is_empty());
        assert!(!extraction.missing_anchors.contains(&"title"));
        assert!(!extraction.missing_anchors.contains(&"#nav-links"));
    }

    #[test]
    fn test_extraction_is_idempotent_apart_from_timestamp() {
        let first = SiteExtractor::extract(PAGE).summary;
        let mut second = SiteExtractor::extract(PAGE).summary;
        second.generated_at = first.generated_at.clone();
        assert_eq!(first, second);
    }
}
