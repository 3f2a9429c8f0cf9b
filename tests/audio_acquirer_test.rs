mod helpers;

use bytes::Bytes;

use moodscribe::application::ports::FetchError;
use moodscribe::application::services::{AcquireError, AudioAcquirer, BufferMode};
use moodscribe::domain::{AudioSource, UntrustedReason};

use helpers::{FakeFetcher, TEST_MAX_BYTES, test_allow_list, trusted_url};

fn inline(bytes: &'static [u8], filename: Option<&str>) -> AudioSource {
    AudioSource::InlineBytes {
        bytes: Bytes::from_static(bytes),
        declared_filename: filename.map(String::from),
    }
}

fn remote(url: &str) -> AudioSource {
    AudioSource::RemoteReference {
        url: url.to_string(),
    }
}

fn memory_acquirer(fetcher: std::sync::Arc<FakeFetcher>) -> AudioAcquirer {
    AudioAcquirer::new(fetcher, test_allow_list(), TEST_MAX_BYTES, BufferMode::Memory)
}

#[tokio::test]
async fn given_inline_bytes_when_acquiring_then_length_and_format_are_preserved() {
    let fetcher = FakeFetcher::returning(b"unused");
    let acquirer = memory_acquirer(fetcher.clone());

    let audio = acquirer
        .acquire(inline(b"0123456789", Some("entry.ogg")))
        .await
        .unwrap();

    assert_eq!(audio.len(), 10);
    assert_eq!(audio.format_hint().extension(), "ogg");
    assert_eq!(audio.read().await.unwrap(), Bytes::from_static(b"0123456789"));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn given_empty_inline_bytes_when_acquiring_then_returns_empty_payload() {
    let acquirer = memory_acquirer(FakeFetcher::returning(b"unused"));

    let result = acquirer.acquire(inline(b"", Some("entry.webm"))).await;

    assert!(matches!(result, Err(AcquireError::EmptyPayload)));
    assert_eq!(acquirer.ledger().acquired(), 0);
}

#[tokio::test]
async fn given_oversized_inline_bytes_when_acquiring_then_returns_payload_too_large() {
    let acquirer = AudioAcquirer::new(
        FakeFetcher::returning(b"unused"),
        test_allow_list(),
        4,
        BufferMode::Memory,
    );

    let result = acquirer.acquire(inline(b"12345", None)).await;

    assert!(matches!(
        result,
        Err(AcquireError::PayloadTooLarge { limit: 4 })
    ));
}

#[tokio::test]
async fn given_trusted_url_when_acquiring_then_fetches_once_and_hints_from_path() {
    let fetcher = FakeFetcher::returning(b"remote-audio");
    let acquirer = memory_acquirer(fetcher.clone());

    let audio = acquirer
        .acquire(remote(&trusted_url("entries/today.mp3")))
        .await
        .unwrap();

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(audio.len(), b"remote-audio".len());
    assert_eq!(audio.format_hint().extension(), "mp3");
    assert_eq!(
        fetcher.last_url().unwrap().as_str(),
        trusted_url("entries/today.mp3")
    );
}

#[tokio::test]
async fn given_untrusted_host_when_acquiring_then_rejects_without_fetching() {
    let fetcher = FakeFetcher::returning(b"remote-audio");
    let acquirer = memory_acquirer(fetcher.clone());

    let result = acquirer
        .acquire(remote("https://169.254.169.254/latest/meta-data"))
        .await;

    assert!(matches!(
        result,
        Err(AcquireError::UntrustedSource(UntrustedReason::HostNotAllowed(_)))
    ));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn given_insecure_scheme_when_acquiring_then_rejects_without_fetching() {
    let fetcher = FakeFetcher::returning(b"remote-audio");
    let acquirer = memory_acquirer(fetcher.clone());

    let result = acquirer
        .acquire(remote(&trusted_url("a.webm").replace("https", "http")))
        .await;

    assert!(matches!(
        result,
        Err(AcquireError::UntrustedSource(UntrustedReason::SchemeNotAllowed(_)))
    ));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn given_remote_error_status_when_acquiring_then_returns_fetch_error() {
    let acquirer = memory_acquirer(FakeFetcher::failing_with_status(404));

    let result = acquirer.acquire(remote(&trusted_url("missing.webm"))).await;

    assert!(matches!(
        result,
        Err(AcquireError::Fetch(FetchError::Status(404)))
    ));
}

#[tokio::test]
async fn given_remote_body_over_limit_when_acquiring_then_returns_payload_too_large() {
    let acquirer = AudioAcquirer::new(
        FakeFetcher::returning(b"0123456789"),
        test_allow_list(),
        8,
        BufferMode::Memory,
    );

    let result = acquirer.acquire(remote(&trusted_url("big.webm"))).await;

    assert!(matches!(
        result,
        Err(AcquireError::PayloadTooLarge { limit: 8 })
    ));
}

#[tokio::test]
async fn given_spool_mode_when_acquiring_then_writes_temp_file_removed_on_release() {
    let dir = tempfile::tempdir().unwrap();
    let acquirer = AudioAcquirer::new(
        FakeFetcher::returning(b"unused"),
        test_allow_list(),
        TEST_MAX_BYTES,
        BufferMode::Spool {
            dir: Some(dir.path().to_path_buf()),
        },
    );

    let audio = acquirer
        .acquire(inline(b"spooled-audio", Some("entry.flac")))
        .await
        .unwrap();

    let path = audio.spool_path().unwrap().to_path_buf();
    assert!(path.exists());
    assert!(path.starts_with(dir.path()));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("flac"));
    assert_eq!(audio.read().await.unwrap(), Bytes::from_static(b"spooled-audio"));

    audio.release();

    assert!(!path.exists());
    assert_eq!(acquirer.ledger().outstanding(), 0);
}

#[tokio::test]
async fn given_spooled_audio_when_dropped_then_temp_file_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let acquirer = AudioAcquirer::new(
        FakeFetcher::returning(b"unused"),
        test_allow_list(),
        TEST_MAX_BYTES,
        BufferMode::Spool {
            dir: Some(dir.path().to_path_buf()),
        },
    );

    let path = {
        let audio = acquirer.acquire(inline(b"abc", None)).await.unwrap();
        audio.spool_path().unwrap().to_path_buf()
    };

    assert!(!path.exists());
    assert_eq!(acquirer.ledger().acquired(), 1);
    assert_eq!(acquirer.ledger().released(), 1);
}

#[tokio::test]
async fn given_several_acquisitions_when_released_then_ledger_balances() {
    let acquirer = memory_acquirer(FakeFetcher::returning(b"remote"));

    let first = acquirer.acquire(inline(b"one", None)).await.unwrap();
    let second = acquirer.acquire(remote(&trusted_url("two.wav"))).await.unwrap();
    assert_eq!(acquirer.ledger().outstanding(), 2);

    first.release();
    drop(second);

    assert_eq!(acquirer.ledger().acquired(), 2);
    assert_eq!(acquirer.ledger().released(), 2);
    assert_eq!(acquirer.ledger().outstanding(), 0);
}
