//! CSV batch pipeline against a scripted client.

mod common;

use std::time::Duration;

use aicli_core::batch::{BatchProcessor, BatchSummary};
use aicli_core::llm::LLMError;
use common::ScriptedClient;
use tempfile::TempDir;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn run(processor: &BatchProcessor<'_>, input: &str) -> (BatchSummary, String) {
    let mut out = Vec::new();
    let summary = processor
        .process_csv(input.as_bytes(), &mut out)
        .await
        .unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_row_templates_fill_result_column() {
        let client = ScriptedClient::new(["sunny", "rainy"]);
        let processor = BatchProcessor::new(&client, None, TIMEOUT).unwrap();
        let input = "id,content,prompt,result\n\
                     1,Paris,Weather in {{.Content}}?,\n\
                     2,London,Forecast for {{ .Content }},\n";

        let (summary, output) = run(&processor, input).await;

        assert_eq!(
            summary,
            BatchSummary {
                processed: 2,
                succeeded: 2,
                failed: 0,
                skipped: 0
            }
        );
        assert_eq!(
            client.prompts(),
            vec!["Weather in Paris?", "Forecast for London"]
        );
        assert_eq!(
            output,
            "id,content,prompt,result\n\
             1,Paris,Weather in {{.Content}}?,sunny\n\
             2,London,Forecast for {{ .Content }},rainy\n"
        );
    }

    #[tokio::test]
    async fn test_global_template_overrides_row_prompts() {
        let client = ScriptedClient::new(["a", "b"]);
        let processor =
            BatchProcessor::new(&client, Some("Translate: {{.Content}}"), TIMEOUT).unwrap();
        let input = "id,content,prompt,result\n1,hola,ignored,\n2,adios,{{.Broken,\n";

        let (summary, _) = run(&processor, input).await;

        assert_eq!(summary.succeeded, 2);
        assert_eq!(client.prompts(), vec!["Translate: hola", "Translate: adios"]);
    }

    #[tokio::test]
    async fn test_each_row_parses_its_own_template() {
        let client = ScriptedClient::new(["x", "y"]);
        let processor = BatchProcessor::new(&client, None, TIMEOUT).unwrap();
        let input = "id,content,prompt,result\n1,one,First {{.Content}},\n2,two,Second {{.Content}},\n";

        run(&processor, input).await;

        assert_eq!(client.prompts(), vec!["First one", "Second two"]);
    }

    #[tokio::test]
    async fn test_short_rows_pass_through_and_failures_leave_result_empty() {
        let client = ScriptedClient::from_results([
            Err(LLMError::RateLimit),
            Ok("fine".to_string()),
        ]);
        let processor = BatchProcessor::new(&client, None, TIMEOUT).unwrap();
        let input = "id,content,prompt,result,extra\n\
                     1,a,p1,old,keep\n\
                     2,b\n\
                     3,c,p3,,\n";

        let (summary, output) = run(&processor, input).await;

        assert_eq!(
            summary,
            BatchSummary {
                processed: 2,
                succeeded: 1,
                failed: 1,
                skipped: 1
            }
        );
        assert_eq!(
            output,
            "id,content,prompt,result,extra\n1,a,p1,,keep\n2,b\n3,c,p3,fine,\n"
        );
    }

    #[tokio::test]
    async fn test_slow_row_times_out_and_processing_continues() {
        let client = ScriptedClient::new(["late", "also late"]).with_delay(Duration::from_secs(2));
        let processor = BatchProcessor::new(&client, None, Duration::from_millis(20)).unwrap();
        let input = "id,content,prompt,result\n1,a,p1,\n2,b,p2,\n";

        let (summary, output) = run(&processor, input).await;

        assert_eq!(summary.failed, 2);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(client.prompts().len(), 2);
        assert_eq!(output, "id,content,prompt,result\n1,a,p1,\n2,b,p2,\n");
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "id,content,prompt,result\n7,\"x, y\",Echo {{.Content}},\n").unwrap();

        let client = ScriptedClient::new(["done"]);
        let processor = BatchProcessor::new(&client, None, TIMEOUT).unwrap();
        let summary = processor.process_csv_file(&input, &output).await.unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(client.prompts(), vec!["Echo x, y"]);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "id,content,prompt,result\n7,\"x, y\",Echo {{.Content}},done\n"
        );
    }

    #[tokio::test]
    async fn test_missing_input_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let client = ScriptedClient::new(Vec::<String>::new());
        let processor = BatchProcessor::new(&client, None, TIMEOUT).unwrap();

        let err = processor
            .process_csv_file(dir.path().join("nope.csv"), dir.path().join("out.csv"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
        assert!(!dir.path().join("out.csv").exists());
    }
}
