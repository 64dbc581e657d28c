// Fixed instruction template for the vision model

/// Labels the model is asked to use, in output order.
pub const LABEL_DETAILED: &str = "DETAILED_DESCRIPTION";
pub const LABEL_VIETNAMESE: &str = "VIETNAMESE_DESCRIPTION";
pub const LABEL_OPTIMIZED: &str = "AI_OPTIMIZED_PROMPT";
pub const LABEL_KEYWORDS: &str = "KEYWORDS";

/// The single instruction sent alongside every image. The model is prompted
/// (not forced) to reply with four labeled, blank-line separated sections.
pub const ANALYSIS_PROMPT: &str = r#"Analyze this image in detail and provide four different outputs:

1. DETAILED_DESCRIPTION: A comprehensive, detailed description of the image including:
   - Main subjects and their positioning
   - Colors, lighting, and atmosphere
   - Style, composition, and artistic elements
   - Background and environment details
   - Emotions or mood conveyed
   - Any text or symbols visible

2. VIETNAMESE_DESCRIPTION: A comprehensive, detailed description of the image in Vietnamese with proper diacritics (có dấu), including:
   - Mô tả chi tiết các đối tượng chính và vị trí của chúng
   - Màu sắc, ánh sáng và bầu không khí
   - Phong cách, bố cục và các yếu tố nghệ thuật
   - Chi tiết về nền và môi trường
   - Cảm xúc hoặc tâm trạng được truyền tải
   - Bất kỳ văn bản hoặc ký hiệu nào có thể nhìn thấy

3. AI_OPTIMIZED_PROMPT: A concise, optimized prompt for AI image generation that captures the essence of the image. Format it for tools like DALL-E, Midjourney, or Stable Diffusion. Include:
   - Key visual elements
   - Style descriptors
   - Quality and technical terms
   - Mood and atmosphere

4. KEYWORDS: A comma-separated list of relevant keywords and tags that describe the image, including:
   - Subject matter
   - Style keywords
   - Color palette
   - Mood/emotion tags
   - Technical/quality terms

Please format your response exactly as follows:
DETAILED_DESCRIPTION: [detailed description here]

VIETNAMESE_DESCRIPTION: [mô tả chi tiết bằng tiếng Việt có dấu ở đây]

AI_OPTIMIZED_PROMPT: [optimized prompt here]

KEYWORDS: [comma-separated keywords here]"#;
