//! Startup registration behavior across deployment profiles.

use webfront::config::profiles::Profiles;
use webfront::config::schema::ServerConfig;
use webfront::container::registration::DispatcherType;
use webfront::container::{Container, ContainerError};
use webfront::web::configurer::{
    self, CACHING_FILTER_NAME, METRICS_FILTER_NAME, METRICS_SERVLET_NAME, STATIC_FILTER_NAME,
};

fn configured(profile_tags: &[&str]) -> Container {
    let config = ServerConfig::default();
    let profiles = Profiles::from_tags(profile_tags.iter().copied());
    let mut container = Container::new();
    configurer::customize(&mut container);
    configurer::on_startup(&mut container, &config, &profiles, None).unwrap();
    container
}

fn pattern_strings(patterns: &[webfront::container::pattern::UrlPattern]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

#[test]
fn dev_profile_registers_metrics_only() {
    let container = configured(&["dev"]);

    let filter_names: Vec<_> = container.filters().iter().map(|r| r.name()).collect();
    assert_eq!(filter_names, [METRICS_FILTER_NAME]);
    assert_eq!(pattern_strings(container.filters()[0].patterns()), ["/*"]);

    let servlet_names: Vec<_> = container.servlets().iter().map(|r| r.name()).collect();
    assert_eq!(servlet_names, [METRICS_SERVLET_NAME]);
    assert_eq!(
        pattern_strings(container.servlets()[0].patterns()),
        ["/metrics/metrics/*"]
    );
}

#[test]
fn unrelated_profiles_behave_like_dev() {
    let container = configured(&["staging", "metrics"]);
    assert_eq!(container.filters().len(), 1);
    assert_eq!(container.servlets().len(), 1);
}

#[test]
fn production_registers_caching_and_static_filters() {
    let container = configured(&["production"]);

    let filter_names: Vec<_> = container.filters().iter().map(|r| r.name()).collect();
    assert_eq!(
        filter_names,
        [METRICS_FILTER_NAME, CACHING_FILTER_NAME, STATIC_FILTER_NAME]
    );

    assert_eq!(
        pattern_strings(container.filters()[1].patterns()),
        ["/assets/*", "/scripts/*", "/maps/*"]
    );
    assert_eq!(
        pattern_strings(container.filters()[2].patterns()),
        ["/", "/index.html", "/assets/*", "/scripts/*"]
    );
}

#[test]
fn metrics_filter_precedes_production_filters() {
    let container = configured(&["production", "metrics"]);
    let position = |name: &str| {
        container
            .filters()
            .iter()
            .position(|r| r.name() == name)
            .unwrap()
    };
    assert!(position(METRICS_FILTER_NAME) < position(CACHING_FILTER_NAME));
    assert!(position(METRICS_FILTER_NAME) < position(STATIC_FILTER_NAME));
}

#[test]
fn mime_overrides_apply_regardless_of_profile() {
    for tags in [&["dev"][..], &["production"][..]] {
        let container = configured(tags);
        let mime = container.mime_mappings();
        assert_eq!(mime.get("html"), Some("text/html;charset=utf-8"));
        assert_eq!(mime.get("json"), Some("text/html;charset=utf-8"));
        // Other defaults are untouched.
        assert_eq!(mime.get("css"), Some("text/css"));
    }
}

#[test]
fn every_registration_is_async_capable() {
    let container = configured(&["production"]);
    for reg in container.filters() {
        assert!(reg.is_async_supported(), "filter {} not async", reg.name());
    }
    for reg in container.servlets() {
        assert!(reg.is_async_supported(), "servlet {} not async", reg.name());
    }
}

#[test]
fn filters_cover_all_dispatch_phases() {
    let container = configured(&["production"]);
    for reg in container.filters() {
        for phase in [
            DispatcherType::Request,
            DispatcherType::Forward,
            DispatcherType::Async,
        ] {
            assert!(
                reg.dispatchers().contains(phase),
                "filter {} missing {:?}",
                reg.name(),
                phase
            );
        }
    }
}

#[test]
fn metrics_servlet_is_eagerly_initialized_at_priority_two() {
    let container = configured(&["dev"]);
    assert_eq!(container.servlets()[0].load_on_startup(), Some(2));
}

#[test]
fn second_startup_fails_with_duplicate_registration() {
    let config = ServerConfig::default();
    let profiles = Profiles::from_tags(["dev"]);
    let mut container = Container::new();
    configurer::customize(&mut container);
    configurer::on_startup(&mut container, &config, &profiles, None).unwrap();

    let err = configurer::on_startup(&mut container, &config, &profiles, None).unwrap_err();
    assert!(matches!(err, ContainerError::DuplicateFilter(_)));
}
