#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components should be generated");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            other => panic!("{} should be an object schema, got {:?}", name, other),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();

        for name in [
            "ErrorResponse",
            "HealthResponse",
            "MonthlyEmissions",
            "TrendReport",
            "IntensityScore",
            "CategoryBreakdown",
            "BenchmarkComparison",
            "EmissionCalculation",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_intensity_score_schema_structure() {
        let properties = object_properties("IntensityScore");
        for field in [
            "score",
            "performance_label",
            "total_co2",
            "benchmark_co2",
            "percentage_vs_benchmark",
            "difference",
            "interpretation",
        ] {
            assert!(properties.iter().any(|p| p == field), "missing {}", field);
        }
    }

    #[test]
    fn test_analytics_paths_are_documented() {
        let openapi = ApiDoc::openapi();

        for report in ["monthly", "trends", "breakdown", "benchmark", "score"] {
            let path = format!("/api/v1/businesses/{{business_id}}/analytics/{}", report);
            let item = openapi
                .paths
                .paths
                .get(&path)
                .unwrap_or_else(|| panic!("{} is not documented", path));
            let get = item.operations.get(&PathItemType::Get).unwrap();
            assert!(get.responses.responses.contains_key("200"));
            assert!(get.responses.responses.contains_key("404"));
        }
    }

    #[test]
    fn test_log_paths_are_documented() {
        let openapi = ApiDoc::openapi();

        let collection = openapi.paths.paths.get("/api/v1/businesses/{business_id}/logs").unwrap();
        assert!(collection.operations.contains_key(&PathItemType::Get));
        assert!(collection.operations.contains_key(&PathItemType::Post));

        let single = openapi
            .paths
            .paths
            .get("/api/v1/businesses/{business_id}/logs/{log_id}")
            .unwrap();
        let delete = single.operations.get(&PathItemType::Delete).unwrap();
        assert!(delete.responses.responses.contains_key("403"));
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("#/components/schemas/ErrorResponse"));
    }
}
