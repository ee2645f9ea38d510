#[cfg(test)]
pub const POST_DATA_MD: &str = r##"---
title: What I learned after 20+ years
date: 2022年4月2日
readTime: 5分钟阅读
mood: 思考
tags: [career, "software"]
summary: Lessons: the short version
---

How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

## Non technical

### Have a honest image of yourself

You finished university and learned a lot. You solved many hard problems.
Some day in your life, you will find that you are not. **The earlier you find that, the better.** This will drive you to improve yourself as you now recognize better your weakest points.
"##;

#[cfg(test)]
pub const POST_DATA_CN: &str = "---
title: 我的新文章
summary: 测试
---
# 标题

正文
";

#[cfg(test)]
pub const POST_DATA_NO_SUMMARY: &str = "---
title: 没有摘要
---
正文
";
