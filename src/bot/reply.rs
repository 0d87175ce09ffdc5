//! Fixed reply texts

use chrono::{DateTime, SecondsFormat, Utc};

use crate::telegram::types::Message;

/// Author credited in `/report`
pub const AUTHOR: &str = "molikai-work";

/// Repository linked in `/report`
pub const REPOSITORY: &str = "https://github.com/molikai-work/QuickTranslateBot";

/// Reply to photos, documents, videos, audio and voice messages
pub const UNSUPPORTED_MEDIA: &str =
    "抱歉，目前我不支持处理图片、视频、音频或文件等媒体类型。只支持对文本进行翻译。";

/// Reply to a private message without text
pub const NO_TEXT: &str = "请发送您需要翻译的文本。";

/// Reply when a quoted group message has nothing to translate
pub const QUOTED_NO_TEXT: &str = "抱歉，引用的消息不包含可翻译的文本。";

/// `/start` usage text
#[must_use]
pub fn start(program_name: &str, version: &str) -> String {
    format!(
        "好！让我们开始翻译，谢谢使用 {program_name} v{version}！\n\
         请您直接的将要翻译的文本发送给我，目前仅支持中英互译，我会自动识别并回复翻译结果。\n\n\
         您也可以使用 /from <源语言> <文本> 命令指定源语言进行翻译。\n\
         使用 /to <目标语言> <文本> 命令快捷指定目标语言进行翻译。\n\
         使用 /translate <源语言> <目标语言> <文本> 命令指定源语言与目标语言进行翻译。\n\n\
         使用 /report 查看程序详细信息。"
    )
}

/// Prompt sent when the bot is mentioned in a group with nothing to do
#[must_use]
pub fn mention_prompt(program_name: &str) -> String {
    format!("您好，欢迎提及 {program_name}！\n请在提及后面输入您需要翻译的文本。")
}

/// `/report` diagnostic text
#[must_use]
pub fn report(program_name: &str, version: &str, now: DateTime<Utc>, message: &Message) -> String {
    let server_time = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let username = message
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("Unknown");
    let user_id = message
        .from
        .as_ref()
        .map_or_else(|| "Unknown".to_string(), |u| u.id.to_string());

    format!(
        "程序名：{program_name}\n\
         版本：{version}\n\
         服务器时间：{server_time}\n\n\
         用户名：@{username}\n\
         用户ID：{user_id}\n\
         聊天ID：{chat_id}\n\
         聊天类型：{chat_type}\n\n\
         作者：{AUTHOR}\n\
         GitHub：{REPOSITORY}",
        chat_id = message.chat.id,
        chat_type = message.chat.chat_type.as_str(),
    )
}
