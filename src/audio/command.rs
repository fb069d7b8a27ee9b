/*
 * src/audio/command.rs
 * 外部コマンド (mpv / espeak-ng など) で実際に音を鳴らす
 */

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::source::PlaybackResource;
use super::Speaker;
use crate::error::AudioError;

pub const DEFAULT_PLAYER: &str = "mpv --no-video --really-quiet";
pub const DEFAULT_TTS: &str = "espeak-ng";

/// espeak-ng の標準の話速 (words per minute)
const BASE_WPM: f32 = 175.0;

/// プログラム名 + 固定の引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// 空白区切りのコマンド文字列を分解する ("mpv --no-video")
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }
}

/// 外部プロセスで1回分の再生を行う
pub struct CommandSpeaker {
    player: CommandLine,
    tts: CommandLine,
}

impl CommandSpeaker {
    pub fn new(player: CommandLine, tts: CommandLine) -> Self {
        Self { player, tts }
    }

    fn command_for(&self, resource: &PlaybackResource) -> (String, Command) {
        match resource {
            PlaybackResource::Clip { url } => {
                let mut command = Command::new(&self.player.program);
                command.args(&self.player.args).arg(url);
                (self.player.program.clone(), command)
            }
            PlaybackResource::Speech { text, lang, rate } => {
                // "ja-JP" -> "ja"
                let voice = lang.split('-').next().unwrap_or(*lang);
                let wpm = (BASE_WPM * rate) as u32;
                let mut command = Command::new(&self.tts.program);
                command
                    .args(&self.tts.args)
                    .arg("-v")
                    .arg(voice)
                    .arg("-s")
                    .arg(wpm.to_string())
                    .arg(text);
                (self.tts.program.clone(), command)
            }
        }
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn play_once(
        &self,
        resource: &PlaybackResource,
        cancel: CancellationToken,
    ) -> Result<(), AudioError> {
        // 起動前に追い越されていたら何もしない
        if cancel.is_cancelled() {
            return Err(AudioError::Interrupted);
        }

        let (program, mut command) = self.command_for(resource);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| AudioError::Spawn {
            program: program.clone(),
            source,
        })?;
        debug!(program = %program, pid = child.id(), "player started");

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| AudioError::PlayerFailed {
                    program: program.clone(),
                    status: e.to_string(),
                })?;
                if status.success() {
                    Ok(())
                } else {
                    Err(AudioError::PlayerFailed { program, status: status.to_string() })
                }
            }
            _ = cancel.cancelled() => {
                if let Err(e) = child.kill().await {
                    debug!(program = %program, error = %e, "failed to kill player");
                }
                Err(AudioError::Interrupted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn args_of(command: &Command) -> Vec<String> {
        command
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn default_speaker() -> CommandSpeaker {
        CommandSpeaker::new(
            CommandLine::parse(DEFAULT_PLAYER).unwrap(),
            CommandLine::parse(DEFAULT_TTS).unwrap(),
        )
    }

    fn clip() -> PlaybackResource {
        PlaybackResource::Clip {
            url: "https://riyutool.com/50yintuceshi/a.mp3".into(),
        }
    }

    #[test]
    fn parse_splits_program_and_args() {
        let line = CommandLine::parse("mpv --no-video  --really-quiet").unwrap();
        assert_eq!(line.program, "mpv");
        assert_eq!(line.args, vec!["--no-video", "--really-quiet"]);
        assert_eq!(CommandLine::parse(DEFAULT_PLAYER), Some(line));
        assert!(CommandLine::parse("   ").is_none());
    }

    #[test]
    fn speech_command_uses_voice_and_rate() {
        let speaker = default_speaker();
        let (program, command) = speaker.command_for(&PlaybackResource::Speech {
            text: "あ".into(),
            lang: "ja-JP",
            rate: 0.9,
        });
        assert_eq!(program, "espeak-ng");
        assert_eq!(args_of(&command), vec!["-v", "ja", "-s", "157", "あ"]);
    }

    #[test]
    fn clip_command_appends_url() {
        let speaker = default_speaker();
        let (program, command) = speaker.command_for(&clip());
        assert_eq!(program, "mpv");
        assert_eq!(
            args_of(&command),
            vec![
                "--no-video",
                "--really-quiet",
                "https://riyutool.com/50yintuceshi/a.mp3"
            ]
        );
    }

    #[tokio::test]
    async fn missing_player_is_spawn_error() {
        let speaker = CommandSpeaker::new(
            CommandLine::new("kanawiz-no-such-player", Vec::<String>::new()),
            CommandLine::new(DEFAULT_TTS, Vec::<String>::new()),
        );
        let err = speaker
            .play_once(&clip(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AudioError::Spawn { .. }));
    }

    #[tokio::test]
    async fn already_cancelled_does_not_spawn() {
        let speaker = CommandSpeaker::new(
            CommandLine::new("kanawiz-no-such-player", Vec::<String>::new()),
            CommandLine::new(DEFAULT_TTS, Vec::<String>::new()),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = speaker.play_once(&clip(), cancel).await.unwrap_err();
        assert!(err.is_interruption());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_player_failure() {
        let speaker = CommandSpeaker::new(
            CommandLine::new("sh", ["-c", "exit 3", "sh"]),
            CommandLine::new(DEFAULT_TTS, Vec::<String>::new()),
        );
        let err = speaker
            .play_once(&clip(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AudioError::PlayerFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cancel_kills_running_player() {
        let speaker = CommandSpeaker::new(
            CommandLine::new("sh", ["-c", "sleep 30", "sh"]),
            CommandLine::new(DEFAULT_TTS, Vec::<String>::new()),
        );
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            speaker.play_once(&clip(), cancel),
        )
        .await
        .expect("player was not killed");
        assert!(result.unwrap_err().is_interruption());
    }
}
