use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
    ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart, ImageUrl,
};

/// One piece of a multimodal user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSegment {
    Text(String),
    /// Fully qualified data URI.
    Image(String),
}

/// Ordered text and image segments sent to the provider as a single user turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultimodalContent {
    pub segments: Vec<ContentSegment>,
}

impl MultimodalContent {
    pub fn new(segments: Vec<ContentSegment>) -> Self {
        Self { segments }
    }

    pub fn text(&self) -> Option<&str> {
        self.segments.iter().find_map(|segment| match segment {
            ContentSegment::Text(text) => Some(text.as_str()),
            ContentSegment::Image(_) => None,
        })
    }

    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            ContentSegment::Image(url) => Some(url.as_str()),
            ContentSegment::Text(_) => None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.image_urls().count()
    }

    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage, crate::Error> {
        let parts: Vec<ChatCompletionRequestUserMessageContentPart> = self
            .segments
            .iter()
            .map(|segment| match segment {
                ContentSegment::Text(text) => ChatCompletionRequestUserMessageContentPart::Text(
                    ChatCompletionRequestMessageContentPartText { text: text.clone() },
                ),
                ContentSegment::Image(url) => {
                    ChatCompletionRequestUserMessageContentPart::ImageUrl(
                        ChatCompletionRequestMessageContentPartImage {
                            image_url: ImageUrl {
                                url: url.clone(),
                                detail: None,
                            },
                        },
                    )
                }
            })
            .collect();

        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(parts))
            .build()
            .map_err(|e| crate::Error::llm(format!("Failed to build user message: {}", e)))?;
        Ok(msg.into())
    }
}
